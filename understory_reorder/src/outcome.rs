// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Committing a finished drag to a collection.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use thiserror::Error;

use crate::collection::{ItemCollection, Location};
use crate::droppable::DroppableId;
use crate::item::{Item, ItemData, ItemId};

/// What a finished drag asks the collection to do.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragOutcome {
    /// The item that was dragged.
    pub dragged: ItemId,
    /// Where it was picked up.
    pub source: Location,
    /// Where it was released; `None` when the drop landed nowhere valid.
    pub destination: Option<Location>,
}

impl DragOutcome {
    /// Create an outcome.
    pub fn new(dragged: impl Into<ItemId>, source: Location, destination: Option<Location>) -> Self {
        Self {
            dragged: dragged.into(),
            source,
            destination,
        }
    }

    /// An outcome with no destination.
    pub fn cancelled(dragged: impl Into<ItemId>, source: Location) -> Self {
        Self::new(dragged, source, None)
    }

    /// Build an outcome from a gesture layer's `(droppable, index)` pairs.
    ///
    /// A destination naming a dropzone becomes "no destination"; dropzone releases are handled
    /// by the host, not by the collection. Returns `None` if the source is a dropzone, since
    /// nothing can be picked up from one.
    pub fn from_gesture(
        dragged: impl Into<ItemId>,
        source: (DroppableId, usize),
        destination: Option<(DroppableId, usize)>,
    ) -> Option<Self> {
        let source = Location::from_droppable(&source.0, source.1)?;
        let destination = destination.and_then(|(id, index)| Location::from_droppable(&id, index));
        Some(Self::new(dragged, source, destination))
    }

    /// Whether applying this outcome can change anything at all.
    pub fn is_noop(&self) -> bool {
        self.destination.as_ref().is_none_or(|dest| *dest == self.source)
    }
}

/// Why an outcome left the collection unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OutcomeError {
    /// The drag was released outside every list.
    #[error("drag has no destination")]
    NoDestination,
    /// Source and destination are the same slot.
    #[error("destination equals source")]
    SamePosition,
    /// The source index is past the end of its list.
    #[error("source index {index} out of range for list of length {len}")]
    SourceOutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the list.
        len: usize,
    },
    /// The source names a container that does not exist.
    #[error("source container `{0}` not found")]
    SourceContainerMissing(ItemId),
    /// The item at the source slot is not the dragged item.
    #[error("expected `{expected}` at source, found `{found}`")]
    DraggedIdMismatch {
        /// The outcome's dragged id.
        expected: ItemId,
        /// The id actually at the source slot.
        found: ItemId,
    },
    /// The destination names a container that does not exist once the dragged item is removed.
    #[error("destination container `{0}` not found")]
    DestinationContainerMissing(ItemId),
    /// The destination index is past the end of its list.
    #[error("destination index {index} out of range for list of length {len}")]
    DestinationOutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the list after removal.
        len: usize,
    },
}

/// Apply `outcome` to `collection`, reporting why nothing changed.
///
/// On success the returned collection is new; `collection` is never modified.
///
/// The rules, in order:
/// 1. No destination, or destination equal to source, is rejected.
/// 2. The dragged item is removed from its source slot.
/// 3. If the destination is nested, the payload is demoted to plain [`ItemData`](crate::ItemData),
///    discarding a container's children.
/// 4. The payload is inserted at the destination index of the list as it stands after removal.
pub fn try_apply_outcome(
    collection: &ItemCollection,
    outcome: &DragOutcome,
) -> Result<ItemCollection, OutcomeError> {
    let destination = outcome
        .destination
        .as_ref()
        .ok_or(OutcomeError::NoDestination)?;
    if *destination == outcome.source {
        return Err(OutcomeError::SamePosition);
    }

    let mut items = collection.items().to_vec();
    let payload = remove_at(&mut items, &outcome.source, &outcome.dragged)?;
    insert_at(&mut items, destination, payload)?;
    Ok(ItemCollection::from_trusted(items))
}

/// Apply `outcome` to `collection`.
///
/// Never fails: any outcome [`try_apply_outcome`] rejects yields
/// [`Cow::Borrowed`] of the input, so callers can skip work when nothing changed.
pub fn apply_outcome<'a>(
    collection: &'a ItemCollection,
    outcome: &DragOutcome,
) -> Cow<'a, ItemCollection> {
    match try_apply_outcome(collection, outcome) {
        Ok(next) => Cow::Owned(next),
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                dragged = %outcome.dragged,
                reason = %_err,
                "drag outcome left collection unchanged"
            );
            Cow::Borrowed(collection)
        }
    }
}

fn remove_at(
    items: &mut Vec<Item>,
    source: &Location,
    dragged: &ItemId,
) -> Result<Item, OutcomeError> {
    match source {
        Location::TopLevel { index } => {
            let found = items.get(*index).ok_or(OutcomeError::SourceOutOfRange {
                index: *index,
                len: items.len(),
            })?;
            check_dragged(found.id(), dragged)?;
            Ok(items.remove(*index))
        }
        Location::Nested { container, index } => {
            let children = children_mut(items, container)
                .ok_or_else(|| OutcomeError::SourceContainerMissing(container.clone()))?;
            let found = children.get(*index).ok_or(OutcomeError::SourceOutOfRange {
                index: *index,
                len: children.len(),
            })?;
            check_dragged(&found.id, dragged)?;
            Ok(Item::Simple(children.remove(*index)))
        }
    }
}

fn insert_at(items: &mut Vec<Item>, destination: &Location, payload: Item) -> Result<(), OutcomeError> {
    match destination {
        Location::TopLevel { index } => {
            if *index > items.len() {
                return Err(OutcomeError::DestinationOutOfRange {
                    index: *index,
                    len: items.len(),
                });
            }
            items.insert(*index, payload);
        }
        Location::Nested { container, index } => {
            let children = children_mut(items, container)
                .ok_or_else(|| OutcomeError::DestinationContainerMissing(container.clone()))?;
            if *index > children.len() {
                return Err(OutcomeError::DestinationOutOfRange {
                    index: *index,
                    len: children.len(),
                });
            }
            children.insert(*index, payload.into_data());
        }
    }
    Ok(())
}

fn children_mut<'a>(items: &'a mut [Item], container: &ItemId) -> Option<&'a mut Vec<ItemData>> {
    items.iter_mut().find_map(|item| match item {
        Item::Container(c) if c.data.id == *container => Some(&mut c.children),
        Item::Container(_) | Item::Simple(_) => None,
    })
}

fn check_dragged(found: &ItemId, dragged: &ItemId) -> Result<(), OutcomeError> {
    if found == dragged {
        Ok(())
    } else {
        Err(OutcomeError::DraggedIdMismatch {
            expected: dragged.clone(),
            found: found.clone(),
        })
    }
}
