// SPDX-License-Identifier: MPL-2.0
//! The single-slot lifecycle state machine.

use crate::animation::{choreography, AnimationBackend, AnimationHandle};
use crate::config::Timing;
use crate::host::{HostAnchor, HostSlot};
use crate::scheduler::{Scheduler, TimerHandle};
use crate::store::{Notification, NotificationId, Store, StoreEvent, Subscription};
use std::sync::{Arc, Mutex, Weak};

/// Lifecycle phase of the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPhase {
    /// Nothing displayed, nothing pending.
    Idle,
    /// Entrance sequence in flight.
    Entering,
    /// Visible; auto-hide timer outstanding.
    Holding,
    /// Exit sequence in flight.
    Exiting,
}

/// Single-slot animation lifecycle controller.
///
/// Exactly one notification (or none) is current at a time. A newly
/// published notification always preempts whatever is shown or animating:
/// the pending auto-hide timer and the in-flight sequence are cancelled
/// before the new entrance begins, so at most one timer and one animation
/// handle are ever outstanding. A dismiss event clears the slot only when
/// its id matches the current entity.
///
/// Dropping the controller (or calling [`shutdown`](Self::shutdown))
/// cancels all pending work.
pub struct SlotController {
    inner: Arc<Mutex<SlotInner>>,
}

struct SlotInner {
    phase: SlotPhase,
    current: Option<Notification>,
    /// The one outstanding auto-hide timer. Always cancelled before
    /// reassignment.
    timer: Option<TimerHandle>,
    /// The one in-flight animation. Always cancelled before reassignment.
    animation: Option<AnimationHandle>,
    /// Bumped on every preemption, exit start and teardown; scheduled
    /// callbacks carry the epoch they were created under and no-op when it
    /// no longer matches.
    epoch: u64,
    shut_down: bool,
    scheduler: Arc<dyn Scheduler>,
    backend: Arc<dyn AnimationBackend>,
    slot: Box<dyn HostSlot>,
    anchor: Option<Box<dyn HostAnchor>>,
    timing: Timing,
}

impl SlotController {
    /// Creates an idle controller bound to a host slot.
    #[must_use]
    pub fn new(
        scheduler: Arc<dyn Scheduler>,
        backend: Arc<dyn AnimationBackend>,
        slot: Box<dyn HostSlot>,
        timing: Timing,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SlotInner {
                phase: SlotPhase::Idle,
                current: None,
                timer: None,
                animation: None,
                epoch: 0,
                shut_down: false,
                scheduler,
                backend,
                slot,
                anchor: None,
                timing,
            })),
        }
    }

    /// Attaches an anchor element that receives decorative cues.
    #[must_use]
    pub fn with_anchor(self, anchor: Box<dyn HostAnchor>) -> Self {
        self.inner
            .lock()
            .expect("slot controller poisoned")
            .anchor = Some(anchor);
        self
    }

    /// Subscribes this controller to a store.
    ///
    /// Keep the returned subscription alive for as long as the controller
    /// should react to the store; unsubscribe it when detaching.
    pub fn attach(&self, store: &Store) -> Subscription<StoreEvent> {
        let weak = Arc::downgrade(&self.inner);
        store.subscribe(move |event| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            match event {
                StoreEvent::Updated(notification) => enter(&inner, notification.clone()),
                StoreEvent::Dismissed(id) => dismissed(&inner, id),
            }
        })
    }

    /// Feeds one store event to the controller directly, for hosts that
    /// route events themselves instead of using [`attach`](Self::attach).
    pub fn handle_event(&self, event: &StoreEvent) {
        match event {
            StoreEvent::Updated(notification) => enter(&self.inner, notification.clone()),
            StoreEvent::Dismissed(id) => dismissed(&self.inner, id),
        }
    }

    /// Returns the current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SlotPhase {
        self.inner.lock().expect("slot controller poisoned").phase
    }

    /// Returns the currently displayed (or animating) notification.
    #[must_use]
    pub fn current(&self) -> Option<Notification> {
        self.inner
            .lock()
            .expect("slot controller poisoned")
            .current
            .clone()
    }

    /// Cancels all pending work and stops reacting to events.
    ///
    /// Idempotent; also runs on drop, so cleanup is guaranteed on every
    /// exit path.
    pub fn shutdown(&self) {
        let mut inner = self.inner.lock().expect("slot controller poisoned");
        if inner.shut_down {
            return;
        }
        inner.shut_down = true;
        inner.epoch += 1;
        cancel_pending(&mut inner);
        inner.current = None;
        inner.phase = SlotPhase::Idle;
    }
}

impl Drop for SlotController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for SlotController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock().expect("slot controller poisoned");
        f.debug_struct("SlotController")
            .field("phase", &inner.phase)
            .field("current", &inner.current.as_ref().map(Notification::id))
            .finish_non_exhaustive()
    }
}

/// Cancels the outstanding timer and in-flight animation, if any.
fn cancel_pending(inner: &mut SlotInner) {
    if let Some(timer) = inner.timer.take() {
        timer.cancel();
    }
    if let Some(animation) = inner.animation.take() {
        animation.cancel();
    }
}

/// Any state -> Entering. A new entity always preempts the slot.
fn enter(inner_arc: &Arc<Mutex<SlotInner>>, notification: Notification) {
    let mut inner = inner_arc.lock().expect("slot controller poisoned");
    if inner.shut_down {
        return;
    }
    inner.epoch += 1;
    let epoch = inner.epoch;
    cancel_pending(&mut inner);

    inner.phase = SlotPhase::Entering;
    inner.current = Some(notification.clone());
    inner.slot.show(&notification);
    if let Some(anchor) = inner.anchor.as_mut() {
        anchor.anticipate();
    }

    let sequence = choreography::entrance(&inner.timing);
    let weak = Arc::downgrade(inner_arc);
    let backend = Arc::clone(&inner.backend);
    inner.animation = Some(backend.play(
        sequence,
        Box::new(move || entrance_complete(&weak, epoch)),
    ));
}

/// Entering -> Holding: schedule the one auto-hide timer.
fn entrance_complete(weak: &Weak<Mutex<SlotInner>>, epoch: u64) {
    let Some(inner_arc) = weak.upgrade() else {
        return;
    };
    let mut inner = inner_arc.lock().expect("slot controller poisoned");
    if inner.shut_down || inner.epoch != epoch {
        return;
    }

    inner.animation = None;
    inner.phase = SlotPhase::Holding;
    if let Some(anchor) = inner.anchor.as_mut() {
        anchor.settle();
    }

    let hold = inner
        .current
        .as_ref()
        .and_then(Notification::duration)
        .unwrap_or(inner.timing.default_hold);
    let timer_weak = weak.clone();
    let scheduler = Arc::clone(&inner.scheduler);
    inner.timer = Some(scheduler.schedule(
        hold,
        Box::new(move || auto_hide(&timer_weak, epoch)),
    ));
}

/// Holding -> Exiting via the auto-hide timer.
fn auto_hide(weak: &Weak<Mutex<SlotInner>>, epoch: u64) {
    let Some(inner_arc) = weak.upgrade() else {
        return;
    };
    let mut inner = inner_arc.lock().expect("slot controller poisoned");
    if inner.shut_down || inner.epoch != epoch || inner.phase != SlotPhase::Holding {
        return;
    }
    begin_exit(&inner_arc, &mut inner);
}

/// Dismiss events clear the slot only when the id matches the current
/// entity; a stale dismiss for a superseded id must not touch a newer one.
fn dismissed(inner_arc: &Arc<Mutex<SlotInner>>, id: &NotificationId) {
    let mut inner = inner_arc.lock().expect("slot controller poisoned");
    if inner.shut_down {
        return;
    }
    let matches = inner
        .current
        .as_ref()
        .is_some_and(|notification| notification.id() == id);
    if !matches {
        return;
    }
    match inner.phase {
        SlotPhase::Entering | SlotPhase::Holding => begin_exit(inner_arc, &mut inner),
        SlotPhase::Exiting | SlotPhase::Idle => {}
    }
}

/// -> Exiting: cancel pending work and play the exit sequence.
fn begin_exit(inner_arc: &Arc<Mutex<SlotInner>>, inner: &mut SlotInner) {
    inner.epoch += 1;
    let epoch = inner.epoch;
    cancel_pending(inner);

    inner.phase = SlotPhase::Exiting;
    let sequence = choreography::exit(&inner.timing);
    let weak = Arc::downgrade(inner_arc);
    let backend = Arc::clone(&inner.backend);
    inner.animation = Some(backend.play(sequence, Box::new(move || exit_complete(&weak, epoch))));
}

/// Exiting -> Idle: tell the host to clear, then drop the current entity.
fn exit_complete(weak: &Weak<Mutex<SlotInner>>, epoch: u64) {
    let Some(inner_arc) = weak.upgrade() else {
        return;
    };
    let mut inner = inner_arc.lock().expect("slot controller poisoned");
    if inner.shut_down || inner.epoch != epoch {
        return;
    }

    inner.animation = None;
    if let Some(anchor) = inner.anchor.as_mut() {
        anchor.restore();
    }
    inner.slot.clear();
    inner.current = None;
    inner.phase = SlotPhase::Idle;
}
