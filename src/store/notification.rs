// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` entity, its `NotificationId`,
//! and the `Draft` input used to create or patch entities in a store.

use std::fmt;
use std::time::Duration;

/// Unique identifier for a notification within one [`Store`](super::Store).
///
/// Ids are either auto-allocated from the store's strictly increasing
/// counter, or supplied by the caller as a non-empty name. An empty
/// caller-supplied name degrades to auto-assignment at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NotificationId {
    /// Auto-allocated sequence number. Never reused within a store.
    Seq(u64),
    /// Caller-supplied name.
    Name(String),
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationId::Seq(n) => write!(f, "#{}", n),
            NotificationId::Name(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for NotificationId {
    fn from(value: u64) -> Self {
        NotificationId::Seq(value)
    }
}

impl From<&str> for NotificationId {
    fn from(value: &str) -> Self {
        NotificationId::Name(value.to_string())
    }
}

impl From<String> for NotificationId {
    fn from(value: String) -> Self {
        NotificationId::Name(value)
    }
}

/// Presentation variant for a notification.
///
/// Exactly one variant exists today; the enum is the extension point for
/// future skins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Standard presentation.
    #[default]
    Default,
}

/// A notification entity as stored in a store's history.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Unique identifier within the owning store.
    id: NotificationId,
    /// Renderable payload; hosts decide how to present it.
    content: String,
    /// Hold time before auto-hide. The controller's default applies when absent.
    duration: Option<Duration>,
    /// Presentation variant.
    variant: Variant,
    /// Optional decorative payload (icon name, glyph, asset key).
    icon: Option<String>,
    /// Whether consumers may offer user-initiated dismissal. Advisory only;
    /// the core does not enforce it.
    dismissible: bool,
}

impl Notification {
    /// Builds a fresh entity from a draft, applying creation defaults:
    /// empty content, `Default` variant, dismissible.
    pub(crate) fn from_draft(id: NotificationId, draft: Draft) -> Self {
        Self {
            id,
            content: draft.content.unwrap_or_default(),
            duration: draft.duration,
            variant: draft.variant.unwrap_or_default(),
            icon: draft.icon,
            dismissible: draft.dismissible.unwrap_or(true),
        }
    }

    /// Returns a copy of this entity with the draft's fields applied as a
    /// field-level override.
    ///
    /// Only fields *present* in the draft replace the stored values; absent
    /// fields are kept as-is, so a caller updating `content` cannot
    /// accidentally clear a previously set `icon` or `duration`. The id is
    /// never changed by a patch.
    #[must_use]
    pub fn patched(&self, draft: &Draft) -> Self {
        Self {
            id: self.id.clone(),
            content: draft.content.clone().unwrap_or_else(|| self.content.clone()),
            duration: draft.duration.or(self.duration),
            variant: draft.variant.unwrap_or(self.variant),
            icon: draft.icon.clone().or_else(|| self.icon.clone()),
            dismissible: draft.dismissible.unwrap_or(self.dismissible),
        }
    }

    /// Returns the notification's unique id.
    #[must_use]
    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    /// Returns the renderable content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the explicit hold duration, if any.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Returns the presentation variant.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Returns the decorative payload, if any.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Returns whether user-initiated dismissal should be offered.
    #[must_use]
    pub fn dismissible(&self) -> bool {
        self.dismissible
    }
}

/// Input for [`Store::create`](super::Store::create): every field optional.
///
/// On creation, absent fields take the documented defaults; on an update of
/// an existing id, absent fields keep their stored values (see
/// [`Notification::patched`]).
#[derive(Debug, Clone, Default)]
pub struct Draft {
    id: Option<NotificationId>,
    content: Option<String>,
    duration: Option<Duration>,
    variant: Option<Variant>,
    icon: Option<String>,
    dismissible: Option<bool>,
}

impl Draft {
    /// Creates an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit id. An empty name degrades to auto-assignment.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<NotificationId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the content payload.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Sets the hold duration before auto-hide.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Sets the hold duration in milliseconds.
    #[must_use]
    pub fn with_duration_ms(self, millis: u64) -> Self {
        self.with_duration(Duration::from_millis(millis))
    }

    /// Sets the presentation variant.
    #[must_use]
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Sets the decorative payload.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets whether user-initiated dismissal should be offered.
    #[must_use]
    pub fn with_dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = Some(dismissible);
        self
    }

    /// Returns the explicit id, if one was set.
    #[must_use]
    pub fn id(&self) -> Option<&NotificationId> {
        self.id.as_ref()
    }

    /// Takes the explicit id out of the draft when it is usable: a sequence
    /// id, or a non-empty name. Empty names are discarded so creation falls
    /// back to auto-assignment.
    pub(crate) fn take_valid_id(&mut self) -> Option<NotificationId> {
        match self.id.take() {
            Some(NotificationId::Name(name)) if name.is_empty() => None,
            other => other,
        }
    }
}
