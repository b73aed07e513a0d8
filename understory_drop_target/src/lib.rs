// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drop_target --heading-base-level=0

//! Understory Drop Target: live drop-target geometry and pointer resolution.
//!
//! This crate answers one question for drag and drop surfaces: *which drop target, if any,
//! currently contains the pointer?* It is renderer-agnostic and does not perform layout.
//!
//! - [`GeometryRegistry`] maps logical target identifiers to a [`RectSource`], a live view of
//!   the target's rendered rectangle. Rectangles are read lazily on every query and never
//!   cached across frames, so layout changes (expansion, scrolling) are always observed.
//! - [`Resolver`] expands each candidate rectangle by a configurable margin
//!   ([`ResolverConfig::margin_fraction`]) and returns the first registered candidate whose
//!   expanded rectangle contains the pointer, skipping an excluded identifier (the dragged item's
//!   own target).
//! - [`DropzoneLayout`] snapshots target positions relative to a scrolling container, for hosts
//!   that draw dropzones in an overlay rather than inline.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_drop_target::{GeometryRegistry, Resolver, ResolverConfig};
//!
//! let mut registry: GeometryRegistry<&str> = GeometryRegistry::new();
//! registry.register("alpha", Rect::new(0.0, 0.0, 100.0, 40.0));
//! registry.register("beta", Rect::new(0.0, 60.0, 100.0, 100.0));
//!
//! let resolver = Resolver::new(ResolverConfig::default());
//!
//! // Inside "beta".
//! assert_eq!(resolver.resolve(&registry, Point::new(50.0, 80.0), None), Some("beta"));
//! // The dragged item never targets itself.
//! assert_eq!(resolver.resolve(&registry, Point::new(50.0, 80.0), Some(&"beta")), None);
//! // Just above "beta", but within its 25% margin (5px on each vertical side).
//! assert_eq!(resolver.resolve(&registry, Point::new(50.0, 56.0), None), Some("beta"));
//! ```
//!
//! ## Tie-breaking
//!
//! When expanded rectangles overlap, the candidate registered first wins. This is iteration
//! order, not a z-order computation; hosts that need stacking semantics should register
//! targets in the order they want them preferred.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` for [`ResolverConfig`].
//! - `tracing`: emits `tracing` events for registration churn and layout refreshes.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod layout;
mod registry;
mod resolver;

pub use layout::{DropzoneLayout, measure_relative};
pub use registry::{GeometryRegistry, RectSource};
pub use resolver::{Resolver, ResolverConfig, contains_inclusive, expand_rect};
