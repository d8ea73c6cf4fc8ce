use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};

use crate::{PoolError, Result};

/// What a task left behind.
enum Outcome<T> {
    Value(T),
    Panicked(String),
    Abandoned,
}

/// Creates a one-shot result channel.
pub(crate) fn channel<T>() -> (Promise<T>, ResultHandle<T>) {
    let (tx, rx) = channel::bounded(1);
    (
        Promise { tx },
        ResultHandle {
            rx,
            outcome: None,
        },
    )
}

/// Producer side of a result channel. Consumed by the single write.
pub(crate) struct Promise<T> {
    tx: Sender<Outcome<T>>,
}

impl<T> Promise<T> {
    /// Runs `task` and publishes its value, or the message of the panic it raised.
    pub(crate) fn complete<F>(self, task: F)
    where
        F: FnOnce() -> T,
    {
        let outcome = match panic::catch_unwind(AssertUnwindSafe(task)) {
            Ok(value) => Outcome::Value(value),
            Err(payload) => Outcome::Panicked(panic_message(payload.as_ref())),
        };
        // The caller may have dropped its handle; then nobody wants the value.
        let _ = self.tx.send(outcome);
    }
}

/// Consumer side of a result channel, returned by `submit`.
///
/// Reading blocks until the task has run. Once a value or failure has
/// arrived it is cached, so every later read sees the same outcome.
pub struct ResultHandle<T> {
    rx: Receiver<Outcome<T>>,
    outcome: Option<Outcome<T>>,
}

impl<T> ResultHandle<T> {
    /// Blocks until the task has run and returns a reference to its value.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::TaskFailure` if the task panicked, or
    /// `PoolError::Abandoned` if it was discarded without running.
    pub fn read(&mut self) -> Result<&T> {
        let rx = &self.rx;
        let outcome = self
            .outcome
            .get_or_insert_with(|| rx.recv().unwrap_or(Outcome::Abandoned));
        match outcome {
            Outcome::Value(value) => Ok(value),
            Outcome::Panicked(msg) => Err(PoolError::TaskFailure(msg.clone())),
            Outcome::Abandoned => Err(PoolError::Abandoned),
        }
    }

    /// Like [`read`](Self::read), but gives up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Timeout` if the task has not finished in time.
    /// The handle stays usable and can be read again later.
    pub fn read_timeout(&mut self, timeout: Duration) -> Result<&T> {
        if self.outcome.is_none() {
            let outcome = match self.rx.recv_timeout(timeout) {
                Ok(outcome) => outcome,
                Err(RecvTimeoutError::Timeout) => return Err(PoolError::Timeout),
                Err(RecvTimeoutError::Disconnected) => Outcome::Abandoned,
            };
            self.outcome = Some(outcome);
        }
        self.read()
    }

    /// Returns `true` if reading would not block.
    pub fn is_ready(&mut self) -> bool {
        if self.outcome.is_none() {
            match self.rx.try_recv() {
                Ok(outcome) => self.outcome = Some(outcome),
                Err(TryRecvError::Empty) => return false,
                Err(TryRecvError::Disconnected) => self.outcome = Some(Outcome::Abandoned),
            }
        }
        true
    }

    /// Blocks until the task has run and returns its value by move.
    ///
    /// # Errors
    ///
    /// Same as [`read`](Self::read).
    pub fn join(self) -> Result<T> {
        let outcome = match self.outcome {
            Some(outcome) => outcome,
            None => self.rx.recv().unwrap_or(Outcome::Abandoned),
        };
        match outcome {
            Outcome::Value(value) => Ok(value),
            Outcome::Panicked(msg) => Err(PoolError::TaskFailure(msg)),
            Outcome::Abandoned => Err(PoolError::Abandoned),
        }
    }
}

/// Extracts a printable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}
