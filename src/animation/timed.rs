// SPDX-License-Identifier: MPL-2.0
//! Duration-driven animation backend.

use super::{AnimationBackend, AnimationHandle, Sequence};
use crate::scheduler::Scheduler;
use std::sync::Arc;

/// Backend that performs no visual interpolation: it fires the completion
/// callback once the sequence's total duration elapses on the given
/// scheduler.
///
/// With a [`ManualScheduler`](crate::scheduler::ManualScheduler) this makes
/// lifecycle timing exact in tests. Hosts with a real tween engine implement
/// [`AnimationBackend`] themselves.
#[derive(Clone)]
pub struct TimedBackend {
    scheduler: Arc<dyn Scheduler>,
}

impl TimedBackend {
    /// Creates a backend driving completions from `scheduler`.
    #[must_use]
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self { scheduler }
    }
}

impl AnimationBackend for TimedBackend {
    fn play(&self, sequence: Sequence, on_complete: Box<dyn FnOnce() + Send>) -> AnimationHandle {
        let timer = self.scheduler.schedule(sequence.total_duration(), on_complete);
        AnimationHandle::new(move || timer.cancel())
    }
}

impl std::fmt::Debug for TimedBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedBackend").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Easing, Target, Tween};
    use crate::scheduler::ManualScheduler;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sequence_of(millis: u64) -> Sequence {
        let mut sequence = Sequence::new();
        sequence.push(Tween::new(Target::Surface, millis, Easing::Linear));
        sequence
    }

    #[test]
    fn completes_after_the_sequence_duration() {
        let scheduler = Arc::new(ManualScheduler::new());
        let backend = TimedBackend::new(scheduler.clone());
        let completions = Arc::new(AtomicUsize::new(0));

        let sink = Arc::clone(&completions);
        let _handle = backend.play(
            sequence_of(300),
            Box::new(move || {
                sink.fetch_add(1, Ordering::SeqCst);
            }),
        );

        scheduler.advance_ms(299);
        assert_eq!(completions.load(Ordering::SeqCst), 0);
        scheduler.advance_ms(1);
        assert_eq!(completions.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cancelled_sequence_never_completes() {
        let scheduler = Arc::new(ManualScheduler::new());
        let backend = TimedBackend::new(scheduler.clone());
        let completions = Arc::new(AtomicUsize::new(0));

        let sink = Arc::clone(&completions);
        let handle = backend.play(
            sequence_of(300),
            Box::new(move || {
                sink.fetch_add(1, Ordering::SeqCst);
            }),
        );

        handle.cancel();
        handle.cancel();
        scheduler.advance_ms(1000);
        assert_eq!(completions.load(Ordering::SeqCst), 0);
    }
}
