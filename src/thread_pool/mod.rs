use crate::result::{self, ResultHandle};
use crate::Result;

/// A unit of work as stored in the queue.
pub(crate) type Job = Box<dyn FnOnce() + Send + 'static>;

/// A thread pool for executing jobs concurrently.
///
/// Implementors manage a fixed set of worker threads and distribute
/// incoming jobs across them.
pub trait ThreadPool {
    /// Creates a new thread pool with the given number of threads.
    ///
    /// Zero is accepted, but such a pool never runs anything.
    ///
    /// # Errors
    ///
    /// Returns an error if a worker thread cannot be spawned.
    fn new(threads: u32) -> Result<Self>
    where
        Self: Sized;

    /// Spawns a function into the thread pool.
    ///
    /// The function will be executed by one of the threads in the pool.
    /// A panic inside it is logged and does not take the worker down.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::PoolStopped` if the pool is shutting down.
    fn spawn<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static;

    /// Submits a function and returns a handle to its eventual result.
    ///
    /// Arguments are bound by capturing them in the closure. Does not
    /// wait for the function to run.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::PoolStopped` if the pool is shutting down, in
    /// which case nothing is queued.
    fn submit<F, T>(&self, task: F) -> Result<ResultHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (promise, handle) = result::channel();
        self.spawn(move || promise.complete(task))?;
        Ok(handle)
    }
}

mod builder;
mod shared_queue;
mod worker;

pub use self::builder::Builder;
pub use self::shared_queue::{SharedQueueThreadPool, Spawner};
