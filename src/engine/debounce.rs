//! Cancellable trailing-edge debounce timer.
//!
//! The engine delays a match run until a quiet period has elapsed since the
//! last keystroke. This module models that delay as an explicit pending
//! task handle: scheduling cancels any not-yet-fired timer, so at most one
//! debounced run is pending per engine instance.

use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;

/// A single-slot debounce timer.
///
/// `schedule` aborts the previously pending timer (if any) before starting
/// a new one, giving trailing-edge semantics: only the last scheduled
/// action within a burst actually runs.
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Creates a debouncer with no pending timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `action` to run after `delay`, cancelling any pending run.
    ///
    /// Must be called from within a tokio runtime. A `delay` of zero still
    /// goes through the timer so cancellation semantics stay uniform.
    pub fn schedule<F>(&self, delay: Duration, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut pending = self.pending.lock().unwrap();
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        }));
    }

    /// Cancels the pending timer, if any.
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.lock().unwrap().take() {
            handle.abort();
        }
    }

    /// Checks whether a scheduled run has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap()
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}
