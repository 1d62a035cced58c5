// SPDX-License-Identifier: MPL-2.0
//! Host adapter seams.
//!
//! The controller owns lifecycle decisions; a host owns pixels. These traits
//! are the whole surface between them. Host callbacks are invoked while the
//! controller holds its internal lock, so they must not call back into the
//! controller or its store synchronously.

use crate::store::Notification;

/// A rendering surface owning one visible notification slot.
pub trait HostSlot: Send {
    /// Called when a notification takes the slot (including preemption of a
    /// previous one).
    fn show(&mut self, notification: &Notification);

    /// Called when the exit sequence completes; the host clears its
    /// displayed entity in response.
    fn clear(&mut self);
}

/// Optional anchor element next to the slot (e.g. a status bar) that
/// receives decorative cues during the lifecycle.
///
/// Purely cosmetic: controllers work identically without one.
pub trait HostAnchor: Send {
    /// Anticipatory cue at entrance start.
    fn anticipate(&mut self);

    /// Settle cue when the notification reaches its hold phase.
    fn settle(&mut self);

    /// Restore cue when the slot empties.
    fn restore(&mut self);
}
