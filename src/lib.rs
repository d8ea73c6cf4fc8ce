#![deny(missing_docs)]

//! A fixed-size worker pool.
//!
//! A bounded set of long-lived threads consume jobs from one shared FIFO
//! queue. Submitting a closure returns a [`ResultHandle`] that blocks
//! until the closure has run and then yields its value, or the panic it
//! raised as a [`PoolError::TaskFailure`].
//!
//! Dropping the pool stops intake, lets the workers drain everything
//! already queued, and joins them.

mod error;
mod result;
/// Thread pool implementations.
pub mod thread_pool;

pub use error::{PoolError, Result};
pub use result::ResultHandle;
pub use thread_pool::{Builder, SharedQueueThreadPool, Spawner, ThreadPool};
