// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered top-level list and addresses into it.

use alloc::vec::Vec;

use hashbrown::HashSet;
use thiserror::Error;

use crate::droppable::DroppableId;
use crate::item::{ContainerItem, Item, ItemId};

/// Errors from building an [`ItemCollection`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// The same identifier appears more than once, at top level or nested.
    #[error("duplicate item id `{0}`")]
    DuplicateId(ItemId),
}

/// An ordered list of items where every identifier, nested ones included, is unique.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemCollection {
    items: Vec<Item>,
}

impl ItemCollection {
    /// Build a collection, rejecting duplicate identifiers.
    pub fn new(items: Vec<Item>) -> Result<Self, CollectionError> {
        check_unique(&items)?;
        Ok(Self { items })
    }

    /// Wrap a list produced by a mutation of an already-valid collection.
    pub(crate) fn from_trusted(items: Vec<Item>) -> Self {
        debug_assert!(check_unique(&items).is_ok(), "mutation produced duplicate ids");
        Self { items }
    }

    /// The top-level items in order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of top-level items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no top-level items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate the top-level items.
    pub fn iter(&self) -> core::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Top-level item with the given id.
    pub fn find(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Top-level container with the given id.
    pub fn container(&self, id: &str) -> Option<&ContainerItem> {
        match self.find(id)? {
            Item::Container(container) => Some(container),
            Item::Simple(_) => None,
        }
    }

    /// Where an item currently lives, searching top level first and then each container.
    pub fn locate(&self, id: &str) -> Option<Location> {
        if let Some(index) = self.items.iter().position(|item| item.id() == id) {
            return Some(Location::top_level(index));
        }
        self.items.iter().find_map(|item| {
            let index = item.children().iter().position(|child| child.id == id)?;
            Some(Location::Nested {
                container: item.id().clone(),
                index,
            })
        })
    }

    /// Every identifier in depth-first order.
    pub fn ids(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.items.iter().flat_map(|item| {
            core::iter::once(item.id()).chain(item.children().iter().map(|child| &child.id))
        })
    }

    /// Unwrap into the top-level list.
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }
}

impl<'a> IntoIterator for &'a ItemCollection {
    type Item = &'a Item;
    type IntoIter = core::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl TryFrom<Vec<Item>> for ItemCollection {
    type Error = CollectionError;

    fn try_from(items: Vec<Item>) -> Result<Self, Self::Error> {
        Self::new(items)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ItemCollection {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<Item>::deserialize(deserializer)?;
        Self::new(items).map_err(serde::de::Error::custom)
    }
}

fn check_unique(items: &[Item]) -> Result<(), CollectionError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for item in items {
        let ids = core::iter::once(item.id()).chain(item.children().iter().map(|child| &child.id));
        for id in ids {
            if !seen.insert(id.as_str()) {
                return Err(CollectionError::DuplicateId(id.clone()));
            }
        }
    }
    Ok(())
}

/// A slot in the collection: a top-level index, or an index inside a container.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "list", rename_all = "snake_case"))]
pub enum Location {
    /// Position in the top-level list.
    TopLevel {
        /// Index in the top-level list.
        index: usize,
    },
    /// Position in a container's child list.
    Nested {
        /// Owning container.
        container: ItemId,
        /// Index in the container's children.
        index: usize,
    },
}

impl Location {
    /// A top-level slot.
    pub fn top_level(index: usize) -> Self {
        Self::TopLevel { index }
    }

    /// A slot inside `container`.
    pub fn nested(container: impl Into<ItemId>, index: usize) -> Self {
        Self::Nested {
            container: container.into(),
            index,
        }
    }

    /// Index within the addressed list.
    pub fn index(&self) -> usize {
        match self {
            Self::TopLevel { index } | Self::Nested { index, .. } => *index,
        }
    }

    /// Owning container, if nested.
    pub fn container(&self) -> Option<&ItemId> {
        match self {
            Self::TopLevel { .. } => None,
            Self::Nested { container, .. } => Some(container),
        }
    }

    /// Whether both locations address the same list.
    pub fn same_list(&self, other: &Self) -> bool {
        self.container() == other.container()
    }

    /// Translate a gesture layer's `(droppable, index)` pair.
    ///
    /// Dropzones are not lists in the collection, so they map to `None`.
    pub fn from_droppable(droppable: &DroppableId, index: usize) -> Option<Self> {
        match droppable {
            DroppableId::Main => Some(Self::top_level(index)),
            DroppableId::Nested(container) => Some(Self::nested(container.clone(), index)),
            DroppableId::Dropzone(_) => None,
        }
    }

    /// The droppable naming the list this location points into.
    pub fn droppable(&self) -> DroppableId {
        match self {
            Self::TopLevel { .. } => DroppableId::Main,
            Self::Nested { container, .. } => DroppableId::Nested(container.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemData;
    use alloc::vec;

    fn sample() -> ItemCollection {
        ItemCollection::new(vec![
            Item::container(
                "c1",
                "Alpha",
                "",
                vec![ItemData::new("n1", "A", ""), ItemData::new("n2", "B", "")],
            ),
            Item::simple("s1", "Beta", ""),
            Item::container("c2", "Gamma", "", vec![]),
        ])
        .unwrap()
    }

    #[test]
    fn duplicate_top_level_ids_are_rejected() {
        let err = ItemCollection::new(vec![Item::simple("a", "", ""), Item::simple("a", "", "")])
            .unwrap_err();
        assert_eq!(err, CollectionError::DuplicateId(ItemId::from("a")));
    }

    #[test]
    fn duplicate_between_top_level_and_nested_is_rejected() {
        let err = ItemCollection::new(vec![
            Item::simple("n1", "", ""),
            Item::container("c1", "", "", vec![ItemData::new("n1", "", "")]),
        ])
        .unwrap_err();
        assert_eq!(err, CollectionError::DuplicateId(ItemId::from("n1")));
    }

    #[test]
    fn locate_finds_top_level_and_nested() {
        let items = sample();
        assert_eq!(items.locate("s1"), Some(Location::top_level(1)));
        assert_eq!(items.locate("n2"), Some(Location::nested("c1", 1)));
        assert_eq!(items.locate("missing"), None);
    }

    #[test]
    fn container_lookup_skips_simple_items() {
        let items = sample();
        assert!(items.container("c2").is_some());
        assert!(items.container("s1").is_none());
        assert!(items.container("n1").is_none());
    }

    #[test]
    fn ids_are_depth_first() {
        let items = sample();
        let ids: Vec<&str> = items.ids().map(ItemId::as_str).collect();
        assert_eq!(ids, ["c1", "n1", "n2", "s1", "c2"]);
    }

    #[test]
    fn droppable_translation() {
        assert_eq!(
            Location::from_droppable(&DroppableId::Main, 3),
            Some(Location::top_level(3))
        );
        assert_eq!(
            Location::from_droppable(&DroppableId::Nested("c1".into()), 0),
            Some(Location::nested("c1", 0))
        );
        assert_eq!(
            Location::from_droppable(&DroppableId::Dropzone("w1".into()), 0),
            None
        );
        assert_eq!(Location::nested("c1", 4).droppable(), DroppableId::Nested("c1".into()));
    }
}
