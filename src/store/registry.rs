// SPDX-License-Identifier: MPL-2.0
//! The notification store.
//!
//! A `Store` owns the canonical history of every notification ever created,
//! the set of dismissed ids, and the id-allocation counter. Mutations are
//! published synchronously to subscribers through a typed broadcast channel.
//!
//! Stores are plain constructable values: independent instances can back
//! separate UI surfaces or headless test harnesses.

use super::broadcast::{Broadcast, Subscription};
use super::notification::{Draft, Notification, NotificationId};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Event fanned out to store subscribers.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// A notification was created or patched in place. Carries the full
    /// resulting entity.
    Updated(Notification),
    /// A notification was dismissed.
    Dismissed(NotificationId),
}

/// Publish/subscribe notification registry with id-based create, update and
/// dismiss semantics.
///
/// History is append-only except for in-place patches keyed by id; entities
/// are never removed, only flagged dismissed. Cloning the store clones a
/// handle to the same instance.
#[derive(Debug, Clone)]
pub struct Store {
    state: Arc<Mutex<State>>,
    events: Arc<Broadcast<StoreEvent>>,
}

#[derive(Debug)]
struct State {
    /// Every notification ever created, in insertion order.
    history: Vec<Notification>,
    /// Ids excluded from the active set. Always a subset of history ids.
    dismissed: HashSet<NotificationId>,
    /// Next auto-assigned sequence id. Strictly increasing, never reused.
    counter: u64,
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                history: Vec::new(),
                dismissed: HashSet::new(),
                counter: 1,
            })),
            events: Arc::new(Broadcast::new()),
        }
    }

    /// Creates a notification, or patches the existing one sharing its id.
    ///
    /// Id resolution: a usable explicit id (sequence id or non-empty name)
    /// is honored verbatim; otherwise the next counter value is assigned.
    /// If the id is present in the dismissed set it is revived. The
    /// resulting entity is published synchronously to every subscriber.
    ///
    /// Returns the resolved id.
    pub fn create(&self, mut draft: Draft) -> NotificationId {
        let (id, entity) = {
            let mut state = self.state.lock().expect("store state poisoned");
            let id = match draft.take_valid_id() {
                Some(id) => id,
                None => {
                    let id = NotificationId::Seq(state.counter);
                    state.counter += 1;
                    id
                }
            };

            // Re-creating a dismissed id revives it.
            state.dismissed.remove(&id);

            let entity = match state.history.iter_mut().find(|n| n.id() == &id) {
                Some(existing) => {
                    let updated = existing.patched(&draft);
                    *existing = updated.clone();
                    updated
                }
                None => {
                    let entity = Notification::from_draft(id.clone(), draft);
                    state.history.push(entity.clone());
                    entity
                }
            };
            (id, entity)
        };

        // Published after the state lock is released so handlers may
        // re-enter the store.
        self.events.publish(&StoreEvent::Updated(entity));
        id
    }

    /// Convenience wrapper: creates a notification from content plus
    /// optional extra fields.
    pub fn message(&self, content: impl Into<String>, draft: Draft) -> NotificationId {
        self.create(draft.with_content(content))
    }

    /// Dismisses the notification with the given id.
    ///
    /// A known id is added to the dismissed set and a
    /// [`StoreEvent::Dismissed`] is published synchronously. An unknown id
    /// is a no-op; it is still echoed back.
    pub fn dismiss(&self, id: impl Into<NotificationId>) -> NotificationId {
        let id = id.into();
        let known = {
            let mut state = self.state.lock().expect("store state poisoned");
            if state.history.iter().any(|n| n.id() == &id) {
                state.dismissed.insert(id.clone());
                true
            } else {
                false
            }
        };
        if known {
            self.events.publish(&StoreEvent::Dismissed(id.clone()));
        }
        id
    }

    /// Dismisses every notification in history.
    ///
    /// One [`StoreEvent::Dismissed`] is published synchronously per history
    /// entry, in insertion order.
    pub fn dismiss_all(&self) {
        let ids: Vec<NotificationId> = {
            let mut state = self.state.lock().expect("store state poisoned");
            let ids: Vec<NotificationId> =
                state.history.iter().map(|n| n.id().clone()).collect();
            for id in &ids {
                state.dismissed.insert(id.clone());
            }
            ids
        };
        for id in ids {
            self.events.publish(&StoreEvent::Dismissed(id));
        }
    }

    /// Registers a handler invoked on every published event.
    ///
    /// The returned guard removes exactly that handler; unsubscribing twice
    /// is a no-op.
    pub fn subscribe(
        &self,
        handler: impl Fn(&StoreEvent) + Send + Sync + 'static,
    ) -> Subscription<StoreEvent> {
        let id = self.events.register(handler);
        Subscription::new(Arc::downgrade(&self.events), id)
    }

    /// Returns the notifications not currently dismissed, in insertion order.
    #[must_use]
    pub fn active(&self) -> Vec<Notification> {
        let state = self.state.lock().expect("store state poisoned");
        state
            .history
            .iter()
            .filter(|n| !state.dismissed.contains(n.id()))
            .cloned()
            .collect()
    }

    /// Returns the full history, dismissed entries included.
    #[must_use]
    pub fn history(&self) -> Vec<Notification> {
        let state = self.state.lock().expect("store state poisoned");
        state.history.clone()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
