use std::io;
use thiserror::Error;

/// Error type for thread pool operations.
#[derive(Error, Debug)]
pub enum PoolError {
    /// A task was submitted after the pool started shutting down.
    #[error("enqueue on stopped thread pool")]
    PoolStopped,

    /// The task panicked while running. Carries the panic message.
    #[error("task panicked: {0}")]
    TaskFailure(String),

    /// A worker thread could not be spawned.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] io::Error),

    /// No result was published within the requested time.
    #[error("timed out waiting for task result")]
    Timeout,

    /// The task was dropped without ever running.
    #[error("task was dropped before it ran")]
    Abandoned,
}

/// Result type alias for thread pool operations.
pub type Result<T> = std::result::Result<T, PoolError>;
