// SPDX-License-Identifier: MPL-2.0
//! Delayed-callback scheduling.
//!
//! The lifecycle controller never owns raw timers; it schedules work through
//! the [`Scheduler`] trait and keeps the returned [`TimerHandle`] so pending
//! work can be cancelled on preemption or teardown.
//!
//! # Implementations
//!
//! - [`TokioScheduler`] - spawns a task per timer on the ambient tokio
//!   runtime.
//! - [`ManualScheduler`] - deterministic virtual-time queue for tests.

mod manual;
mod runtime;

pub use manual::ManualScheduler;
pub use runtime::TokioScheduler;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Schedules a callback to run once after a delay.
pub trait Scheduler: Send + Sync {
    /// Schedules `callback` to run after `delay`.
    ///
    /// The callback runs at most once; cancelling the returned handle before
    /// the timer fires prevents it from running at all.
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce() + Send>) -> TimerHandle;
}

/// Cancellation handle for one scheduled callback.
///
/// Cancellation is idempotent: cancelling twice, or cancelling a timer that
/// has already fired, is a no-op.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    cancelled: Arc<AtomicBool>,
    abort: Option<tokio::task::AbortHandle>,
}

impl TimerHandle {
    /// Creates a handle backed by a shared cancellation flag.
    ///
    /// The scheduler implementation must check the flag before running the
    /// callback.
    #[must_use]
    pub fn from_flag(cancelled: Arc<AtomicBool>) -> Self {
        Self {
            cancelled,
            abort: None,
        }
    }

    /// Additionally aborts a tokio task on cancellation, so a sleeping timer
    /// task is released promptly.
    #[must_use]
    pub fn with_abort(mut self, abort: tokio::task::AbortHandle) -> Self {
        self.abort = Some(abort);
        self
    }

    /// Cancels the scheduled callback.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(abort) = &self.abort {
            abort.abort();
        }
    }

    /// Returns whether this timer was cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_idempotent() {
        let handle = TimerHandle::from_flag(Arc::new(AtomicBool::new(false)));
        assert!(!handle.is_cancelled());
        handle.cancel();
        handle.cancel();
        assert!(handle.is_cancelled());
    }
}
