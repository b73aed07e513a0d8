// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item model: identifiers, simple items and containers.

use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;

/// Stable identifier of an item, unique across a whole [`ItemCollection`](crate::ItemCollection).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(String);

impl ItemId {
    /// Create an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.into())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ItemId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ItemId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Fields shared by every item; on its own, a simple item.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemData {
    /// Stable identifier.
    pub id: ItemId,
    /// Display title.
    pub title: String,
    /// Display note.
    pub note: String,
}

impl ItemData {
    /// Create item data.
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            note: note.into(),
        }
    }
}

/// A top-level item that owns a list of simple children.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerItem {
    /// The container's own identifier, title and note.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub data: ItemData,
    /// Ordered children.
    pub children: Vec<ItemData>,
}

/// Kind tag of an [`Item`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ItemKind {
    /// No children.
    Simple,
    /// Owns a child list.
    Container,
}

/// An entry in the top-level list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum Item {
    /// A plain item.
    Simple(ItemData),
    /// An item with a nested child list.
    Container(ContainerItem),
}

impl Item {
    /// A simple item.
    pub fn simple(id: impl Into<ItemId>, title: impl Into<String>, note: impl Into<String>) -> Self {
        Self::Simple(ItemData::new(id, title, note))
    }

    /// A container with the given children.
    pub fn container(
        id: impl Into<ItemId>,
        title: impl Into<String>,
        note: impl Into<String>,
        children: Vec<ItemData>,
    ) -> Self {
        Self::Container(ContainerItem {
            data: ItemData::new(id, title, note),
            children,
        })
    }

    /// Shared fields.
    pub fn data(&self) -> &ItemData {
        match self {
            Self::Simple(data) => data,
            Self::Container(container) => &container.data,
        }
    }

    /// Identifier.
    pub fn id(&self) -> &ItemId {
        &self.data().id
    }

    /// Kind tag.
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Simple(_) => ItemKind::Simple,
            Self::Container(_) => ItemKind::Container,
        }
    }

    /// Whether this item is a container.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Container(_))
    }

    /// Children of a container; empty for a simple item.
    pub fn children(&self) -> &[ItemData] {
        match self {
            Self::Simple(_) => &[],
            Self::Container(container) => &container.children,
        }
    }

    /// Project to a simple item, discarding a container's children.
    ///
    /// This is the demotion applied when an item is moved into a nested list.
    pub fn into_data(self) -> ItemData {
        match self {
            Self::Simple(data) => data,
            Self::Container(container) => container.data,
        }
    }
}

impl From<ItemData> for Item {
    fn from(data: ItemData) -> Self {
        Self::Simple(data)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use crate::{CollectionError, ItemCollection};
    use alloc::format;
    use alloc::string::ToString;
    use alloc::vec;

    const CONTAINER_JSON: &str = r#"{
        "id": "container-1",
        "title": "Waypoint Alpha",
        "note": "Container with nested items",
        "type": "container",
        "children": [
            { "id": "nested-1", "title": "Sub-task A", "note": "First nested item", "type": "simple" },
            { "id": "nested-2", "title": "Sub-task B", "note": "Second nested item", "type": "simple" }
        ]
    }"#;

    #[test]
    fn container_reads_flat_shape() {
        let item: Item = serde_json::from_str(CONTAINER_JSON).unwrap();
        assert_eq!(
            item,
            Item::container(
                "container-1",
                "Waypoint Alpha",
                "Container with nested items",
                vec![
                    ItemData::new("nested-1", "Sub-task A", "First nested item"),
                    ItemData::new("nested-2", "Sub-task B", "Second nested item"),
                ],
            )
        );
    }

    #[test]
    fn container_writes_flat_shape() {
        let item = Item::container("c1", "Alpha", "n", vec![ItemData::new("x", "X", "")]);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "container",
                "id": "c1",
                "title": "Alpha",
                "note": "n",
                "children": [{ "id": "x", "title": "X", "note": "" }],
            })
        );
        let back: Item = serde_json::from_value(value).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn simple_is_tagged() {
        let item = Item::simple("simple-1", "Waypoint Beta", "Simple item - no nesting");
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "simple");
        assert_eq!(serde_json::from_value::<Item>(value).unwrap(), item);
    }

    #[test]
    fn collection_rejects_duplicate_ids() {
        let json = r#"[
            { "id": "a", "title": "", "note": "", "type": "simple" },
            { "id": "c", "title": "", "note": "", "type": "container",
              "children": [{ "id": "a", "title": "", "note": "" }] }
        ]"#;
        let err = serde_json::from_str::<ItemCollection>(json).unwrap_err();
        let expected = CollectionError::DuplicateId("a".into());
        assert!(
            err.to_string().contains(&expected.to_string()),
            "unexpected error: {err}"
        );

        let ok = format!("[{CONTAINER_JSON}]");
        let items: ItemCollection = serde_json::from_str(&ok).unwrap();
        assert_eq!(items.ids().count(), 3);
    }
}
