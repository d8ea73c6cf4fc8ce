use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use log::{debug, error};

use super::shared_queue::Shared;
use crate::result::panic_message;

/// Body of a worker thread.
///
/// Takes jobs in queue order and runs each one outside the lock. Exits
/// only when the pool is stopped and nothing is left to run.
pub(super) fn run(id: usize, shared: Arc<Shared>) {
    debug!("Worker {id} started");

    while let Some(job) = shared.next_job() {
        debug!("Worker {id} executing job");
        // Catch panics so the worker loop continues
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(job)) {
            error!(
                "Worker {id} job panicked, continuing: {}",
                panic_message(payload.as_ref())
            );
        }
    }

    debug!("Worker {id}: pool stopped and queue drained, shutting down");
}
