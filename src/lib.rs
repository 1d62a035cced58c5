// SPDX-License-Identifier: MPL-2.0
//! `status_toast` is a transient, single-slot notification ("toast") core.
//!
//! Callers fire short-lived messages into a [`store::Store`]; a
//! [`controller::SlotController`] decides which one is visible, drives the
//! entrance/hold/exit lifecycle, and auto-expires it. Rendering stays with
//! the host behind the [`host`] traits, and the tween engine behind
//! [`animation::AnimationBackend`], so the core is framework-agnostic and
//! fully testable with the [`scheduler::ManualScheduler`].

#![doc(html_root_url = "https://docs.rs/status_toast/0.1.0")]

pub mod animation;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod scheduler;
pub mod store;
