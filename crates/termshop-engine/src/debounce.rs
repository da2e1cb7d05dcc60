//! Single-slot debounce timer.
//!
//! At most one scheduled task is pending at a time; scheduling again cancels
//! the pending timer and starts a fresh one. Once a timer fires, its task is
//! spawned detached and is no longer cancellable, which is exactly the
//! search semantics: typing restarts the countdown but never aborts a query
//! already on the wire.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::lock;

#[derive(Debug, Default)]
pub(crate) struct Debouncer {
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Runs `task` after `delay`, cancelling any not-yet-fired predecessor.
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn schedule<F>(&self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Detached from the timer handle: aborting a later schedule can
            // only stop timers, never a task that already started.
            tokio::spawn(task);
        });

        let mut pending = lock(&self.pending);
        if let Some(previous) = pending.replace(timer) {
            previous.abort();
        }
    }

    /// Cancels the pending timer, if any.
    pub(crate) fn cancel(&self) {
        if let Some(previous) = lock(&self.pending).take() {
            previous.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
