// SPDX-License-Identifier: MPL-2.0
//! Animation sequence description and backend seam.
//!
//! The lifecycle controller never interpolates properties itself. It builds
//! a [`Sequence`] - an ordered set of tweens with phase offsets and easing
//! hints - and hands it to an [`AnimationBackend`], which reports back
//! through a single completion callback. Concrete tween engines are
//! swappable behind the trait; [`TimedBackend`] is the built-in one that
//! drives completion purely from the sequence's total duration.

mod timed;

pub mod choreography;

pub use timed::TimedBackend;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Easing hint for one tween. Backends map these onto whatever curves the
/// underlying engine offers; they carry no timing semantics of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Accelerating curve of the given power.
    PowerIn(u8),
    /// Decelerating curve of the given power.
    PowerOut(u8),
    /// Symmetric ease-in-out of the given power.
    PowerInOut(u8),
    /// Overshooting elastic settle.
    ElasticOut,
    /// Pull-back before accelerating away.
    BackIn,
}

/// What a tween animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The notification container itself.
    Surface,
    /// The content (text/icon) inside the container.
    Content,
    /// The host anchor element next to the slot.
    Anchor,
}

/// Position of a tween relative to the end of the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offset {
    /// Starts exactly when the previous tween ends.
    AfterPrevious,
    /// Starts before the previous tween ends, overlapping it.
    Overlap(Duration),
    /// Starts after a pause following the previous tween.
    Gap(Duration),
}

/// One property transition within a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tween {
    pub target: Target,
    pub duration: Duration,
    /// Number of back-and-forth repetitions (1 = play once). A settle pulse
    /// is a 2-cycle tween.
    pub cycles: u32,
    pub offset: Offset,
    pub easing: Easing,
}

impl Tween {
    /// Creates a single-cycle tween that starts when the previous one ends.
    #[must_use]
    pub fn new(target: Target, duration_ms: u64, easing: Easing) -> Self {
        Self {
            target,
            duration: Duration::from_millis(duration_ms),
            cycles: 1,
            offset: Offset::AfterPrevious,
            easing,
        }
    }

    /// Starts this tween `millis` before the previous one ends.
    #[must_use]
    pub fn overlapping(mut self, millis: u64) -> Self {
        self.offset = Offset::Overlap(Duration::from_millis(millis));
        self
    }

    /// Starts this tween `millis` after the previous one ends.
    #[must_use]
    pub fn after_gap(mut self, millis: u64) -> Self {
        self.offset = Offset::Gap(Duration::from_millis(millis));
        self
    }

    /// Repeats the tween for the given number of cycles.
    #[must_use]
    pub fn with_cycles(mut self, cycles: u32) -> Self {
        self.cycles = cycles.max(1);
        self
    }

    fn span(&self) -> Duration {
        self.duration * self.cycles
    }
}

/// An ordered set of tweens forming one timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    tweens: Vec<Tween>,
}

impl Sequence {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a tween to the timeline.
    pub fn push(&mut self, tween: Tween) {
        self.tweens.push(tween);
    }

    /// Returns the tweens in timeline order.
    #[must_use]
    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    /// Returns the total timeline length: the latest end time across all
    /// tweens, with each tween positioned relative to the previous one's
    /// end per its [`Offset`].
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        let mut cursor = Duration::ZERO;
        let mut total = Duration::ZERO;
        for tween in &self.tweens {
            let start = match tween.offset {
                Offset::AfterPrevious => cursor,
                Offset::Overlap(by) => cursor.saturating_sub(by),
                Offset::Gap(by) => cursor + by,
            };
            let end = start + tween.span();
            cursor = end;
            total = total.max(end);
        }
        total
    }

    /// Returns a copy of this sequence scaled so its total duration equals
    /// `target`. Every tween duration and offset scales proportionally; an
    /// empty or zero-length sequence is returned unchanged.
    #[must_use]
    pub fn scaled_to(&self, target: Duration) -> Self {
        let total = self.total_duration();
        if total.is_zero() || total == target {
            return self.clone();
        }
        let ratio = target.as_secs_f64() / total.as_secs_f64();
        let scale = |d: Duration| d.mul_f64(ratio);
        let tweens = self
            .tweens
            .iter()
            .map(|tween| Tween {
                duration: scale(tween.duration),
                offset: match tween.offset {
                    Offset::AfterPrevious => Offset::AfterPrevious,
                    Offset::Overlap(by) => Offset::Overlap(scale(by)),
                    Offset::Gap(by) => Offset::Gap(scale(by)),
                },
                ..*tween
            })
            .collect();
        Self { tweens }
    }
}

/// Plays sequences and reports completion.
///
/// A backend must invoke `on_complete` exactly once when the sequence runs
/// to its end, and never after the returned handle was cancelled.
pub trait AnimationBackend: Send + Sync {
    fn play(&self, sequence: Sequence, on_complete: Box<dyn FnOnce() + Send>) -> AnimationHandle;
}

/// Cancellation handle for one in-flight sequence.
///
/// Cancelling kills the sequence (it is not allowed to run to completion);
/// cancelling twice or after completion is a no-op.
#[derive(Clone)]
pub struct AnimationHandle {
    canceller: Arc<dyn Fn() + Send + Sync>,
}

impl AnimationHandle {
    /// Wraps the backend's cancellation hook. The hook must be idempotent.
    #[must_use]
    pub fn new(canceller: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            canceller: Arc::new(canceller),
        }
    }

    /// Cancels the in-flight sequence.
    pub fn cancel(&self) {
        (self.canceller)();
    }
}

impl fmt::Debug for AnimationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationHandle").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_has_zero_duration() {
        assert_eq!(Sequence::new().total_duration(), Duration::ZERO);
    }

    #[test]
    fn after_previous_tweens_run_back_to_back() {
        let mut sequence = Sequence::new();
        sequence.push(Tween::new(Target::Surface, 100, Easing::Linear));
        sequence.push(Tween::new(Target::Content, 200, Easing::Linear));
        assert_eq!(sequence.total_duration(), Duration::from_millis(300));
    }

    #[test]
    fn overlap_shortens_and_gap_lengthens_the_timeline() {
        let mut overlapped = Sequence::new();
        overlapped.push(Tween::new(Target::Surface, 100, Easing::Linear));
        overlapped.push(Tween::new(Target::Content, 200, Easing::Linear).overlapping(50));
        assert_eq!(overlapped.total_duration(), Duration::from_millis(250));

        let mut gapped = Sequence::new();
        gapped.push(Tween::new(Target::Surface, 100, Easing::Linear));
        gapped.push(Tween::new(Target::Content, 200, Easing::Linear).after_gap(50));
        assert_eq!(gapped.total_duration(), Duration::from_millis(350));
    }

    #[test]
    fn cycles_multiply_a_tween_span() {
        let mut sequence = Sequence::new();
        sequence.push(Tween::new(Target::Surface, 100, Easing::PowerInOut(2)).with_cycles(2));
        assert_eq!(sequence.total_duration(), Duration::from_millis(200));
    }

    #[test]
    fn short_early_tween_does_not_shorten_the_total() {
        // A long overlapping tween can end after the tweens that follow it.
        let mut sequence = Sequence::new();
        sequence.push(Tween::new(Target::Surface, 500, Easing::Linear));
        sequence.push(Tween::new(Target::Anchor, 50, Easing::Linear).overlapping(400));
        assert_eq!(sequence.total_duration(), Duration::from_millis(500));
    }

    #[test]
    fn scaled_to_halves_every_component() {
        let mut sequence = Sequence::new();
        sequence.push(Tween::new(Target::Surface, 100, Easing::Linear));
        sequence.push(Tween::new(Target::Content, 200, Easing::Linear).overlapping(100));

        let scaled = sequence.scaled_to(Duration::from_millis(100));
        assert_eq!(scaled.total_duration(), Duration::from_millis(100));
        assert_eq!(scaled.tweens()[0].duration, Duration::from_millis(50));
        assert_eq!(
            scaled.tweens()[1].offset,
            Offset::Overlap(Duration::from_millis(50))
        );
    }

    #[test]
    fn animation_handle_cancel_invokes_hook() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let hits = Arc::new(AtomicUsize::new(0));
        let hook_hits = Arc::clone(&hits);
        let handle = AnimationHandle::new(move || {
            hook_hits.fetch_add(1, Ordering::SeqCst);
        });
        handle.cancel();
        handle.cancel();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
