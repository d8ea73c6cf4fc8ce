use super::SharedQueueThreadPool;
use crate::Result;

const DEFAULT_NAME_PREFIX: &str = "pool-worker";

/// Configures and starts a [`SharedQueueThreadPool`].
///
/// ```no_run
/// use taskpool::{Builder, ThreadPool};
///
/// let pool = Builder::new().num_threads(2).thread_name("io").build()?;
/// let answer = pool.submit(|| 6 * 7)?.join()?;
/// assert_eq!(answer, 42);
/// # Ok::<(), taskpool::PoolError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    num_threads: Option<usize>,
    name_prefix: String,
    stack_size: Option<usize>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Builder {
            num_threads: None,
            name_prefix: DEFAULT_NAME_PREFIX.to_owned(),
            stack_size: None,
        }
    }

    /// Sets the number of worker threads. Defaults to the number of CPUs.
    pub fn num_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Sets the worker name prefix. Workers are named `{prefix}-{id}`.
    pub fn thread_name(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    /// Sets the stack size of each worker, in bytes.
    pub fn stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    pub(super) fn threads(&self) -> usize {
        self.num_threads.unwrap_or_else(num_cpus::get)
    }

    pub(super) fn worker_name(&self, id: usize) -> String {
        format!("{}-{id}", self.name_prefix)
    }

    pub(super) fn worker_stack_size(&self) -> Option<usize> {
        self.stack_size
    }

    /// Spawns the workers and returns the running pool.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Spawn` if a worker cannot be created. Workers
    /// started before the failure are stopped and joined first.
    pub fn build(self) -> Result<SharedQueueThreadPool> {
        SharedQueueThreadPool::start(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PoolError, ThreadPool};
    use std::thread;

    #[test]
    fn defaults_to_cpu_count() {
        let pool = Builder::new().build().unwrap();
        assert_eq!(pool.num_threads(), num_cpus::get());
    }

    #[test]
    fn workers_carry_the_configured_name() {
        let pool = Builder::new()
            .num_threads(1)
            .thread_name("custom")
            .stack_size(256 * 1024)
            .build()
            .unwrap();
        let name = pool
            .submit(|| thread::current().name().map(str::to_owned))
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(name.as_deref(), Some("custom-0"));
    }

    #[test]
    fn zero_threads_is_accepted() {
        let pool = Builder::new().num_threads(0).build().unwrap();
        assert_eq!(pool.num_threads(), 0);
    }

    #[test]
    fn spawn_failure_aborts_construction() {
        let result = Builder::new()
            .num_threads(3)
            .stack_size(usize::MAX / 2)
            .build();
        assert!(matches!(result, Err(PoolError::Spawn(_))));
    }
}
