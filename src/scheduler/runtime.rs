// SPDX-License-Identifier: MPL-2.0
//! Tokio-backed scheduler.

use super::{Scheduler, TimerHandle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Scheduler that spawns one task per timer on the ambient tokio runtime.
///
/// `schedule` must be called from within a tokio runtime context. Cancelling
/// a handle both flags the timer and aborts the sleeping task.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl TokioScheduler {
    /// Creates a new tokio scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce() + Send>) -> TimerHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let task_cancelled = Arc::clone(&cancelled);
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The flag closes the race between firing and a late cancel.
            if !task_cancelled.load(Ordering::SeqCst) {
                callback();
            }
        });
        TimerHandle::from_flag(cancelled).with_abort(task.abort_handle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn fires_callback_after_delay() {
        let scheduler = TokioScheduler::new();
        let (tx, rx) = oneshot::channel();
        let tx = std::sync::Mutex::new(Some(tx));

        let _handle = scheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                if let Some(tx) = tx.lock().unwrap().take() {
                    let _ = tx.send(());
                }
            }),
        );

        tokio::time::timeout(Duration::from_millis(500), rx)
            .await
            .expect("timer never fired")
            .expect("sender dropped");
    }

    #[tokio::test]
    async fn cancelled_timer_does_not_fire() {
        let scheduler = TokioScheduler::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let task_hits = Arc::clone(&hits);

        let handle = scheduler.schedule(
            Duration::from_millis(20),
            Box::new(move || {
                task_hits.fetch_add(1, Ordering::SeqCst);
            }),
        );
        handle.cancel();

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn cancel_after_fire_is_a_noop() {
        let scheduler = TokioScheduler::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let task_hits = Arc::clone(&hits);

        let handle = scheduler.schedule(
            Duration::from_millis(5),
            Box::new(move || {
                task_hits.fetch_add(1, Ordering::SeqCst);
            }),
        );

        tokio::time::sleep(Duration::from_millis(60)).await;
        handle.cancel();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
