// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all timing constants.
//!
//! This module serves as the single source of truth for the timing contract
//! of the notification lifecycle. Constants are organized by phase.

// ==========================================================================
// Entrance
// ==========================================================================

/// Fixed budget for the entrance sequence, in milliseconds.
///
/// The auto-hide timer is scheduled only after this budget elapses, so the
/// absolute fire time of the timer is `entrance start + entrance + hold`.
pub const DEFAULT_ENTRANCE_MS: u64 = 2000;

// ==========================================================================
// Hold
// ==========================================================================

/// Default hold time before auto-hide, in milliseconds.
///
/// Applies when a notification carries no explicit `duration`.
pub const DEFAULT_HOLD_MS: u64 = 3000;

// ==========================================================================
// Exit
// ==========================================================================

/// Budget for the exit sequence, in milliseconds.
pub const DEFAULT_EXIT_MS: u64 = 500;
