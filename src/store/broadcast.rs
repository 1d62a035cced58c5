// SPDX-License-Identifier: MPL-2.0
//! Typed broadcast channel for store events.
//!
//! A `Broadcast<T>` fans one value out to every registered handler. It
//! replaces an ad-hoc callback array with an explicit register/unregister/
//! publish contract, so alternate hosts (rendering backends, headless test
//! harnesses) can observe the same events without framework hooks.

use std::sync::{Arc, Mutex, Weak};

/// Shared handler type invoked on every publish.
pub type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Opaque handle identifying one registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// A typed publish/subscribe registry.
///
/// Publishing iterates a stable snapshot of the handler list, so handlers
/// may register or unregister other handlers (or themselves) mid-publish
/// without corrupting the iteration.
pub struct Broadcast<T> {
    registry: Mutex<Registry<T>>,
}

struct Registry<T> {
    next_id: u64,
    handlers: Vec<(SubscriberId, Handler<T>)>,
}

impl<T> Broadcast<T> {
    /// Creates an empty broadcast channel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry {
                next_id: 0,
                handlers: Vec::new(),
            }),
        }
    }

    /// Registers a handler, returning its id for later removal.
    pub fn register(&self, handler: impl Fn(&T) + Send + Sync + 'static) -> SubscriberId {
        let mut registry = self.registry.lock().expect("broadcast registry poisoned");
        let id = SubscriberId(registry.next_id);
        registry.next_id += 1;
        registry.handlers.push((id, Arc::new(handler)));
        id
    }

    /// Removes the handler with the given id.
    ///
    /// Returns `true` if a handler was removed; removing an unknown or
    /// already-removed id is a no-op.
    pub fn unregister(&self, id: SubscriberId) -> bool {
        let mut registry = self.registry.lock().expect("broadcast registry poisoned");
        let before = registry.handlers.len();
        registry.handlers.retain(|(handler_id, _)| *handler_id != id);
        registry.handlers.len() != before
    }

    /// Publishes a value to every handler registered at call time.
    ///
    /// The handler list is snapshotted before any handler runs; the registry
    /// lock is not held during handler execution.
    pub fn publish(&self, value: &T) {
        let snapshot: Vec<Handler<T>> = {
            let registry = self.registry.lock().expect("broadcast registry poisoned");
            registry
                .handlers
                .iter()
                .map(|(_, handler)| Arc::clone(handler))
                .collect()
        };
        for handler in snapshot {
            handler(value);
        }
    }

    /// Returns the number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry
            .lock()
            .expect("broadcast registry poisoned")
            .handlers
            .len()
    }

    /// Returns whether no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for Broadcast<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Broadcast<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Broadcast")
            .field("handlers", &self.len())
            .finish()
    }
}

/// Guard returned by [`Store::subscribe`](super::Store::subscribe).
///
/// Does not unsubscribe on drop; call [`Subscription::unsubscribe`], which
/// removes exactly the handler this guard was issued for. Calling it more
/// than once is a no-op, as is calling it after the store is gone.
#[derive(Debug)]
pub struct Subscription<T> {
    channel: Weak<Broadcast<T>>,
    id: SubscriberId,
}

impl<T> Subscription<T> {
    pub(crate) fn new(channel: Weak<Broadcast<T>>, id: SubscriberId) -> Self {
        Self { channel, id }
    }

    /// Removes the handler this subscription was issued for.
    pub fn unsubscribe(&self) {
        if let Some(channel) = self.channel.upgrade() {
            channel.unregister(self.id);
        }
    }
}
