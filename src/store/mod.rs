// SPDX-License-Identifier: MPL-2.0
//! Notification store: the publish/subscribe registry behind the slot.
//!
//! Callers create and dismiss notifications here; rendering surfaces
//! subscribe and react. The store never forgets: dismissed entities stay in
//! history, flagged rather than deleted, and can be revived by re-creating
//! their id.
//!
//! # Components
//!
//! - [`Notification`], [`NotificationId`], and the [`Draft`] create/patch
//!   input
//! - the [`Store`] itself and its [`StoreEvent`] fan-out
//! - [`Broadcast`], the typed publish/subscribe channel used for the fan-out
//! - [`Coalescer`], opt-in frame-boundary batching for hosts
//!
//! # Usage
//!
//! ```
//! use status_toast::store::{Draft, Store};
//!
//! let store = Store::new();
//! let _subscription = store.subscribe(|event| {
//!     // drive a controller, log, or record for assertions
//!     let _ = event;
//! });
//!
//! let id = store.message("Image saved", Draft::new());
//! store.dismiss(id);
//! assert!(store.active().is_empty());
//! assert_eq!(store.history().len(), 1);
//! ```

mod broadcast;
mod coalesce;
mod notification;
mod registry;

pub use broadcast::{Broadcast, Handler, SubscriberId, Subscription};
pub use coalesce::Coalescer;
pub use notification::{Draft, Notification, NotificationId, Variant};
pub use registry::{Store, StoreEvent};
