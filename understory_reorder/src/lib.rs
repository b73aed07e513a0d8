// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_reorder --heading-base-level=0

//! Understory Reorder: item collections that users rearrange by drag and drop.
//!
//! This crate holds the data side of a reorderable list and commits finished drags to it.
//! It knows nothing about pointers or geometry; pair it with `understory_drag_session` for that.
//!
//! ## Model
//!
//! - [`Item`] is either [`Item::Simple`] or [`Item::Container`]. A container owns an ordered
//!   list of [`ItemData`] children, so nesting is one level deep by construction.
//! - [`ItemCollection`] is the ordered top-level list. Identifiers are unique across the whole
//!   collection, nested children included.
//! - [`Location`] addresses a slot: a top-level index, or a container id plus child index.
//!
//! ## Committing a drag
//!
//! [`apply_outcome`] is a pure function from the old collection and a [`DragOutcome`] to the new
//! collection. It returns [`Cow::Borrowed`](alloc::borrow::Cow::Borrowed) when nothing changes
//! (no destination, same slot, or an outcome that no longer fits the collection) so hosts can skip
//! a re-render, and never panics. [`try_apply_outcome`] is the same operation with the reason for
//! a no-op reported as an [`OutcomeError`].
//!
//! A container dropped into another container's child list is demoted: it is inserted as plain
//! [`ItemData`] and its children are discarded.
//!
//! ```rust
//! use understory_reorder::{
//!     DragOutcome, Item, ItemCollection, ItemData, Location, apply_outcome,
//! };
//!
//! let items = ItemCollection::new(vec![
//!     Item::container("c1", "Alpha", "", vec![ItemData::new("x", "X", "")]),
//!     Item::simple("s1", "Beta", ""),
//!     Item::container("c2", "Gamma", "", vec![]),
//! ])
//! .unwrap();
//!
//! // Drop container "c1" into "c2"'s child list.
//! let outcome = DragOutcome::new(
//!     "c1",
//!     Location::top_level(0),
//!     Some(Location::nested("c2", 0)),
//! );
//! let next = apply_outcome(&items, &outcome);
//!
//! let c2 = next.container("c2").unwrap();
//! assert_eq!(c2.children[0].id.as_str(), "c1");
//! // "x" went away with the demoted container.
//! assert!(next.locate("x").is_none());
//! ```
//!
//! ## Droppable identifiers
//!
//! Gesture layers usually name drop lists with strings. [`DroppableId`] parses and formats the
//! conventional names: `main`, `nested-<container>` and `dropzone-<owner>`.
//! [`DragOutcome::from_gesture`] turns a gesture layer's `(droppable, index)` pairs straight
//! into an outcome.
//!
//! ## Features
//!
//! - `serde`: derives `Serialize`/`Deserialize` for the item model and [`Location`].
//! - `tracing`: emits a `debug` event for every outcome that leaves the collection unchanged.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod collection;
mod droppable;
mod item;
mod outcome;

pub use collection::{CollectionError, ItemCollection, Location};
pub use droppable::{DroppableId, ParseDroppableIdError};
pub use item::{ContainerItem, Item, ItemData, ItemId, ItemKind};
pub use outcome::{DragOutcome, OutcomeError, apply_outcome, try_apply_outcome};
