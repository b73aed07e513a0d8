// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session configuration.

use understory_drop_target::ResolverConfig;

/// How the active drop target is determined while dragging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackingPolicy {
    /// Sample the pointer, coalesce to one pass per frame, and hit-test the geometry registry.
    #[default]
    PointerFollow,
    /// Trust the gesture layer's own destination reports
    /// ([`DragSession::on_gesture_update`](crate::DragSession::on_gesture_update)).
    ///
    /// Pointer samples still feed the lane lock, but no frames are scheduled.
    GestureUpdates,
}

/// Where satellite dropzones are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DropzoneMode {
    /// Beneath or beside their owning item.
    #[default]
    Inline,
    /// In a shared overlay positioned from measured geometry.
    Portal,
}

/// Configuration bundle for a [`DragSession`](crate::DragSession).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    /// Hit-testing configuration used on every frame.
    pub resolver: ResolverConfig,
    /// Pointer-follow vs. gesture-update activation.
    pub tracking: TrackingPolicy,
    /// Dropzone presentation; can only change while idle.
    pub dropzone_mode: DropzoneMode,
}

impl SessionConfig {
    /// Default configuration with a custom resolver margin.
    pub fn with_margin(margin_fraction: f64) -> Self {
        Self {
            resolver: ResolverConfig::with_margin(margin_fraction),
            ..Self::default()
        }
    }

    /// Default configuration with the given tracking policy.
    pub fn with_tracking(tracking: TrackingPolicy) -> Self {
        Self {
            tracking,
            ..Self::default()
        }
    }
}
