// SPDX-License-Identifier: MPL-2.0
//! Single-slot animation lifecycle control.
//!
//! The [`SlotController`] binds one rendering slot to a notification store:
//! it decides which notification is visible, drives the
//! entrance -> hold -> exit phases, schedules auto-hide, and cancels stale
//! work when a newer notification preempts the slot.
//!
//! # Usage
//!
//! ```ignore
//! use status_toast::animation::TimedBackend;
//! use status_toast::config::Timing;
//! use status_toast::controller::SlotController;
//! use status_toast::scheduler::TokioScheduler;
//! use status_toast::store::Store;
//! use std::sync::Arc;
//!
//! let scheduler = Arc::new(TokioScheduler::new());
//! let backend = Arc::new(TimedBackend::new(scheduler.clone()));
//! let controller =
//!     SlotController::new(scheduler, backend, Box::new(my_slot), Timing::default());
//!
//! let store = Store::new();
//! let _subscription = controller.attach(&store);
//! ```

mod slot;

pub use slot::{SlotController, SlotPhase};
