use std::collections::VecDeque;
use std::mem;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use log::{debug, error};

use super::{worker, Builder, Job, ThreadPool};
use crate::result::{self, ResultHandle};
use crate::{PoolError, Result};

/// Queue and stop flag, always accessed together under one lock.
struct State {
    queue: VecDeque<Job>,
    stop: bool,
}

/// State shared between the pool, its spawners and its workers.
pub(super) struct Shared {
    state: Mutex<State>,
    /// Signalled when a job is queued or the pool stops.
    available: Condvar,
}

impl Shared {
    fn new() -> Self {
        Shared {
            state: Mutex::new(State {
                queue: VecDeque::new(),
                stop: false,
            }),
            available: Condvar::new(),
        }
    }

    // Jobs never run under the lock, so a poisoned guard still holds a
    // consistent queue.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, job: Job) -> Result<()> {
        {
            let mut state = self.lock();
            if state.stop {
                return Err(PoolError::PoolStopped);
            }
            state.queue.push_back(job);
        }
        self.available.notify_one();
        Ok(())
    }

    fn stop(&self) {
        self.lock().stop = true;
        self.available.notify_all();
    }

    /// Blocks until a job is available and takes it from the head of the
    /// queue. Returns `None` once the pool is stopped and the queue is empty.
    pub(super) fn next_job(&self) -> Option<Job> {
        let state = self.lock();
        let mut state = self
            .available
            .wait_while(state, |state| !state.stop && state.queue.is_empty())
            .unwrap_or_else(PoisonError::into_inner);
        state.queue.pop_front()
    }
}

/// A fixed-size thread pool using a shared FIFO job queue.
///
/// Workers block on a condition variable until a job is queued or the
/// pool stops. Each submission wakes one worker; shutdown wakes all of
/// them. Workers drain the queue before they exit, so every job accepted
/// before shutdown runs exactly once.
///
/// Dropping the pool performs the same blocking shutdown as
/// [`shutdown`](Self::shutdown).
pub struct SharedQueueThreadPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl SharedQueueThreadPool {
    /// Returns a builder for configuring a pool.
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub(super) fn start(config: &Builder) -> Result<Self> {
        let threads = config.threads();
        let mut pool = SharedQueueThreadPool {
            shared: Arc::new(Shared::new()),
            workers: Vec::with_capacity(threads),
        };

        for id in 0..threads {
            let shared = Arc::clone(&pool.shared);
            let mut builder = thread::Builder::new().name(config.worker_name(id));
            if let Some(size) = config.worker_stack_size() {
                builder = builder.stack_size(size);
            }
            // On error `pool` is dropped, which stops and joins the workers
            // spawned so far.
            let handle = builder.spawn(move || worker::run(id, shared))?;
            pool.workers.push(handle);
        }

        debug!("Started thread pool with {} workers", threads);
        Ok(pool)
    }

    /// Returns a cloneable handle that can submit jobs from other threads,
    /// including from jobs running on this pool.
    pub fn spawner(&self) -> Spawner {
        Spawner {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Number of worker threads owned by the pool. Zero after shutdown.
    pub fn num_threads(&self) -> usize {
        self.workers.len()
    }

    /// Number of jobs waiting in the queue, not counting running ones.
    pub fn queued(&self) -> usize {
        self.shared.lock().queue.len()
    }

    /// Returns `true` once shutdown has begun.
    pub fn is_stopped(&self) -> bool {
        self.shared.lock().stop
    }

    /// Stops accepting jobs, waits for queued jobs to finish and joins all
    /// workers. Calling it more than once is harmless.
    pub fn shutdown(&mut self) {
        self.shared.stop();

        for handle in self.workers.drain(..) {
            let name = handle.thread().name().unwrap_or("<unnamed>").to_owned();
            if handle.join().is_err() {
                error!("Worker thread {} panicked", name);
            }
        }

        // Only a pool without workers can leave jobs behind. Dropping them
        // outside the lock releases their result handles as abandoned.
        let leftover = mem::take(&mut self.shared.lock().queue);
        if !leftover.is_empty() {
            debug!("Discarding {} jobs left on a pool without workers", leftover.len());
        }
        drop(leftover);
    }
}

impl ThreadPool for SharedQueueThreadPool {
    fn new(threads: u32) -> Result<Self> {
        Builder::new().num_threads(threads as usize).build()
    }

    fn spawn<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.shared.push(Box::new(job))
    }
}

impl Drop for SharedQueueThreadPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// A handle for submitting jobs to a [`SharedQueueThreadPool`].
///
/// A spawner does not keep the workers alive. Once the pool begins
/// shutting down, every submission through it fails with
/// `PoolError::PoolStopped`.
#[derive(Clone)]
pub struct Spawner {
    shared: Arc<Shared>,
}

impl Spawner {
    /// Spawns a function into the pool. See [`ThreadPool::spawn`].
    ///
    /// # Errors
    ///
    /// Returns `PoolError::PoolStopped` if the pool is shutting down.
    pub fn spawn<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.shared.push(Box::new(job))
    }

    /// Submits a function and returns a handle to its result. See
    /// [`ThreadPool::submit`].
    ///
    /// # Errors
    ///
    /// Returns `PoolError::PoolStopped` if the pool is shutting down.
    pub fn submit<F, T>(&self, task: F) -> Result<ResultHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (promise, handle) = result::channel();
        self.spawn(move || promise.complete(task))?;
        Ok(handle)
    }
}
