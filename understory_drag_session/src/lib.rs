// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drag_session --heading-base-level=0

//! Understory Drag Session: pointer tracking and drag state for drop-target activation.
//!
//! ## Overview
//!
//! A drag gesture is supplied by an external gesture layer (pointer capture, placeholders,
//! animations). This crate owns the small amount of state that sits beside it:
//!
//! - [`PointerTracker`] coalesces raw pointer samples. The latest sample wins, and at most one
//!   frame callback is requested at a time through a [`FrameScheduler`], so resolution work is
//!   bounded by the display's refresh rate rather than the pointer's sampling rate.
//! - [`DragSession`] is an `idle → dragging → idle` state machine. It starts and stops the
//!   tracker, resolves the active drop target on each frame with an
//!   [`understory_drop_target::Resolver`], and exposes derived [`DragFlags`] for rendering.
//!
//! ## Ordering and cancellation
//!
//! Every frame request carries a [`FrameTicket`] stamped with the drag it belongs to. Stopping
//! the tracker cancels the pending request, but correctness does not depend on cancellation
//! succeeding: a ticket from a stopped (or superseded) drag is discarded when it arrives.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_drag_session::{DragFlags, DragSession, ManualScheduler};
//! use understory_drop_target::GeometryRegistry;
//!
//! let mut registry = GeometryRegistry::new();
//! registry.register("b", Rect::new(0.0, 60.0, 100.0, 100.0));
//!
//! let mut session = DragSession::new(ManualScheduler::new());
//! session.on_gesture_start("a");
//!
//! // Many pointer samples, one frame.
//! session.on_pointer_move(Point::new(10.0, 10.0));
//! session.on_pointer_move(Point::new(50.0, 80.0));
//! let tickets = session.scheduler_mut().take_frames();
//! assert_eq!(tickets.len(), 1);
//!
//! for ticket in tickets {
//!     session.on_frame(ticket, &registry);
//! }
//! assert_eq!(session.active_target(), Some(&"b"));
//! assert!(session.flags().contains(DragFlags::TARGET_ENTERED));
//!
//! let ended = session.on_gesture_end().unwrap();
//! assert_eq!(ended.last_target, Some("b"));
//! assert!(session.flags().is_empty());
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` for [`SessionConfig`] and its parts.
//! - `tracing`: emits `tracing` events for session transitions and target changes.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod scheduler;
mod session;
mod tracker;

pub use config::{DropzoneMode, SessionConfig, TrackingPolicy};
pub use scheduler::{FrameHandle, FrameScheduler, FrameTicket, ManualScheduler};
pub use session::{DragEnd, DragFlags, DragPhase, DragSession, TargetChange};
pub use tracker::PointerTracker;
