// SPDX-License-Identifier: MPL-2.0
//! Reference entrance and exit choreography.
//!
//! This is presentation metadata, not contract: the controller only depends
//! on the sequences' total durations matching the configured budgets. Hosts
//! that want a different look can feed the backend their own sequences.

use super::{Easing, Sequence, Target, Tween};
use crate::config::Timing;
#[cfg(test)]
use std::time::Duration;

// Base entrance phases, in milliseconds, summing to the 2000ms reference
// budget. Order: anchor cue, morph, resize, content fade-in, settle pulse.
const ANCHOR_CUE_MS: u64 = 200;
const MORPH_MS: u64 = 500;
const RESIZE_MS: u64 = 600;
const RESIZE_OVERLAP_MS: u64 = 200;
const CONTENT_IN_MS: u64 = 400;
const CONTENT_IN_OVERLAP_MS: u64 = 300;
const SETTLE_MS: u64 = 300;
const SETTLE_GAP_MS: u64 = 200;

// Base exit phases, summing to the 500ms reference budget.
const CONTENT_OUT_MS: u64 = 200;
const SHRINK_MS: u64 = 400;
const SHRINK_OVERLAP_MS: u64 = 100;

/// Builds the entrance sequence: anticipatory anchor cue, shape/position
/// morph, size expansion, content fade-in, settle pulse. The result is
/// scaled so its total duration equals `timing.entrance`.
#[must_use]
pub fn entrance(timing: &Timing) -> Sequence {
    let mut sequence = Sequence::new();
    sequence.push(Tween::new(Target::Anchor, ANCHOR_CUE_MS, Easing::PowerOut(2)));
    sequence.push(Tween::new(Target::Surface, MORPH_MS, Easing::PowerOut(3)));
    sequence.push(
        Tween::new(Target::Surface, RESIZE_MS, Easing::PowerOut(4)).overlapping(RESIZE_OVERLAP_MS),
    );
    sequence.push(
        Tween::new(Target::Content, CONTENT_IN_MS, Easing::PowerOut(2))
            .overlapping(CONTENT_IN_OVERLAP_MS),
    );
    sequence.push(
        Tween::new(Target::Surface, SETTLE_MS, Easing::PowerInOut(2))
            .with_cycles(2)
            .after_gap(SETTLE_GAP_MS),
    );
    sequence.scaled_to(timing.entrance)
}

/// Builds the exit sequence: content fade/scale out, then container
/// shrink/fade out. The result is scaled so its total duration equals
/// `timing.exit`.
#[must_use]
pub fn exit(timing: &Timing) -> Sequence {
    let mut sequence = Sequence::new();
    sequence.push(Tween::new(Target::Content, CONTENT_OUT_MS, Easing::PowerIn(2)));
    sequence.push(
        Tween::new(Target::Surface, SHRINK_MS, Easing::BackIn).overlapping(SHRINK_OVERLAP_MS),
    );
    sequence.scaled_to(timing.exit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Offset;

    #[test]
    fn entrance_total_equals_the_configured_budget() {
        let timing = Timing::default();
        assert_eq!(entrance(&timing).total_duration(), timing.entrance);

        let halved = Timing {
            entrance: Duration::from_millis(1000),
            ..Timing::default()
        };
        assert_eq!(entrance(&halved).total_duration(), halved.entrance);
    }

    #[test]
    fn exit_total_equals_the_configured_budget() {
        let timing = Timing::default();
        assert_eq!(exit(&timing).total_duration(), timing.exit);
    }

    #[test]
    fn entrance_opens_with_the_anchor_cue() {
        let sequence = entrance(&Timing::default());
        let first = &sequence.tweens()[0];
        assert_eq!(first.target, Target::Anchor);
        assert_eq!(first.offset, Offset::AfterPrevious);
    }

    #[test]
    fn settle_pulse_is_a_two_cycle_tween() {
        let sequence = entrance(&Timing::default());
        let settle = sequence.tweens().last().unwrap();
        assert_eq!(settle.cycles, 2);
        assert_eq!(settle.target, Target::Surface);
    }

    #[test]
    fn exit_fades_content_before_shrinking_the_surface() {
        let sequence = exit(&Timing::default());
        assert_eq!(sequence.tweens()[0].target, Target::Content);
        assert_eq!(sequence.tweens()[1].target, Target::Surface);
    }
}
