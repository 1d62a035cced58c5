// SPDX-License-Identifier: MPL-2.0
//! Deterministic virtual-time scheduler for tests.

use super::{Scheduler, TimerHandle};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scheduler driven by explicit [`advance`](ManualScheduler::advance) calls.
///
/// Timers fire in due-time order (registration order breaks ties), and the
/// virtual clock is moved to each timer's due time before its callback runs,
/// so callbacks that schedule follow-up work observe consistent time.
/// Nothing fires without an `advance` call, which makes lifecycle races
/// reproducible in tests.
pub struct ManualScheduler {
    state: Mutex<ManualState>,
}

struct ManualState {
    now: Duration,
    next_seq: u64,
    queue: Vec<Entry>,
}

struct Entry {
    due: Duration,
    seq: u64,
    cancelled: Arc<AtomicBool>,
    callback: Box<dyn FnOnce() + Send>,
}

impl ManualScheduler {
    /// Creates a scheduler with the virtual clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ManualState {
                now: Duration::ZERO,
                next_seq: 0,
                queue: Vec::new(),
            }),
        }
    }

    /// Returns the current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.state.lock().expect("manual scheduler poisoned").now
    }

    /// Returns the number of scheduled, not-yet-cancelled timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.state
            .lock()
            .expect("manual scheduler poisoned")
            .queue
            .iter()
            .filter(|entry| !entry.cancelled.load(Ordering::SeqCst))
            .count()
    }

    /// Advances the virtual clock by `step`, running every timer that comes
    /// due along the way.
    ///
    /// Callbacks run outside the internal lock, so they may schedule or
    /// cancel other timers; follow-up timers that come due within the same
    /// `advance` window also run.
    pub fn advance(&self, step: Duration) {
        let target = self.now() + step;
        loop {
            let next = {
                let mut state = self.state.lock().expect("manual scheduler poisoned");
                let due_index = state
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| entry.due <= target)
                    .min_by_key(|(_, entry)| (entry.due, entry.seq))
                    .map(|(index, _)| index);
                match due_index {
                    Some(index) => {
                        let entry = state.queue.swap_remove(index);
                        state.now = state.now.max(entry.due);
                        Some(entry)
                    }
                    None => {
                        state.now = target;
                        None
                    }
                }
            };
            match next {
                Some(entry) => {
                    if !entry.cancelled.load(Ordering::SeqCst) {
                        (entry.callback)();
                    }
                }
                None => break,
            }
        }
    }

    /// Advances the virtual clock by `millis` milliseconds.
    pub fn advance_ms(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce() + Send>) -> TimerHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let mut state = self.state.lock().expect("manual scheduler poisoned");
        let entry = Entry {
            due: state.now + delay,
            seq: state.next_seq,
            cancelled: Arc::clone(&cancelled),
            callback,
        };
        state.next_seq += 1;
        state.queue.push(entry);
        TimerHandle::from_flag(cancelled)
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock().expect("manual scheduler poisoned");
        f.debug_struct("ManualScheduler")
            .field("now", &state.now)
            .field("queued", &state.queue.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter_callback(hits: &Arc<AtomicUsize>) -> Box<dyn FnOnce() + Send> {
        let hits = Arc::clone(hits);
        Box::new(move || {
            hits.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn nothing_fires_before_due_time() {
        let scheduler = ManualScheduler::new();
        let hits = Arc::new(AtomicUsize::new(0));
        scheduler.schedule(Duration::from_millis(100), counter_callback(&hits));

        scheduler.advance_ms(99);
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        scheduler.advance_ms(1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn timers_fire_in_due_order_with_registration_tiebreak() {
        let scheduler = ManualScheduler::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for (label, delay) in [("late", 50u64), ("early", 10), ("tied-a", 10)] {
            let order = Arc::clone(&order);
            scheduler.schedule(
                Duration::from_millis(delay),
                Box::new(move || order.lock().unwrap().push(label)),
            );
        }

        scheduler.advance_ms(100);
        assert_eq!(*order.lock().unwrap(), vec!["early", "tied-a", "late"]);
    }

    #[test]
    fn cancelled_timer_is_skipped() {
        let scheduler = ManualScheduler::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let handle = scheduler.schedule(Duration::from_millis(10), counter_callback(&hits));

        handle.cancel();
        assert_eq!(scheduler.pending(), 0);

        scheduler.advance_ms(20);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn callback_may_schedule_follow_up_work() {
        let scheduler = Arc::new(ManualScheduler::new());
        let hits = Arc::new(AtomicUsize::new(0));

        let chained = Arc::clone(&scheduler);
        let chained_hits = Arc::clone(&hits);
        scheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                chained.schedule(Duration::from_millis(10), counter_callback(&chained_hits));
            }),
        );

        // Both the first timer and its follow-up come due within the window.
        scheduler.advance_ms(20);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.now(), Duration::from_millis(20));
    }

    #[test]
    fn follow_up_beyond_window_waits_for_next_advance() {
        let scheduler = Arc::new(ManualScheduler::new());
        let hits = Arc::new(AtomicUsize::new(0));

        let chained = Arc::clone(&scheduler);
        let chained_hits = Arc::clone(&hits);
        scheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                chained.schedule(Duration::from_millis(50), counter_callback(&chained_hits));
            }),
        );

        scheduler.advance_ms(20);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance_ms(40);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
