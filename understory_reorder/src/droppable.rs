// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! String names of drop lists.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use crate::item::ItemId;

const MAIN: &str = "main";
const NESTED_PREFIX: &str = "nested-";
const DROPZONE_PREFIX: &str = "dropzone-";

/// Name of a list a gesture layer can drop into.
///
/// Formats as `main`, `nested-<container>` or `dropzone-<owner>` and parses the same forms.
/// Item ids may themselves contain `-`; everything after the prefix is the id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DroppableId {
    /// The top-level list.
    Main,
    /// A container's child list.
    Nested(ItemId),
    /// The satellite dropzone of an item.
    Dropzone(ItemId),
}

impl DroppableId {
    /// Owner of a dropzone droppable.
    pub fn dropzone_owner(&self) -> Option<&ItemId> {
        match self {
            Self::Dropzone(owner) => Some(owner),
            Self::Main | Self::Nested(_) => None,
        }
    }
}

impl fmt::Display for DroppableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => f.write_str(MAIN),
            Self::Nested(id) => write!(f, "{NESTED_PREFIX}{id}"),
            Self::Dropzone(id) => write!(f, "{DROPZONE_PREFIX}{id}"),
        }
    }
}

/// Failure to parse a [`DroppableId`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseDroppableIdError {
    /// Not `main` and no known prefix.
    #[error("unrecognized droppable id `{0}`")]
    Unrecognized(String),
    /// A known prefix with nothing after it.
    #[error("droppable id `{0}` names no item")]
    EmptyItemId(String),
}

impl FromStr for DroppableId {
    type Err = ParseDroppableIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == MAIN {
            return Ok(Self::Main);
        }
        let (rest, ctor): (&str, fn(ItemId) -> Self) =
            if let Some(rest) = s.strip_prefix(NESTED_PREFIX) {
                (rest, Self::Nested)
            } else if let Some(rest) = s.strip_prefix(DROPZONE_PREFIX) {
                (rest, Self::Dropzone)
            } else {
                return Err(ParseDroppableIdError::Unrecognized(s.to_string()));
            };
        if rest.is_empty() {
            return Err(ParseDroppableIdError::EmptyItemId(s.to_string()));
        }
        Ok(ctor(ItemId::from(rest)))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DroppableId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DroppableId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn parses_known_forms() {
        assert_eq!("main".parse(), Ok(DroppableId::Main));
        assert_eq!(
            "nested-container-1".parse(),
            Ok(DroppableId::Nested("container-1".into()))
        );
        assert_eq!(
            "dropzone-item-3".parse(),
            Ok(DroppableId::Dropzone("item-3".into()))
        );
    }

    #[test]
    fn rejects_unknown_and_empty() {
        assert_eq!(
            "sidebar".parse::<DroppableId>(),
            Err(ParseDroppableIdError::Unrecognized("sidebar".into()))
        );
        assert_eq!(
            "nested-".parse::<DroppableId>(),
            Err(ParseDroppableIdError::EmptyItemId("nested-".into()))
        );
        // Case matters.
        assert!("Main".parse::<DroppableId>().is_err());
    }

    #[test]
    fn display_matches_parse() {
        let ids = [
            DroppableId::Main,
            DroppableId::Nested("container-1".into()),
            DroppableId::Dropzone("w-2".into()),
            DroppableId::Nested("nested-3".into()),
        ];
        let names = ["main", "nested-container-1", "dropzone-w-2", "nested-nested-3"];
        for (id, name) in ids.iter().zip(names) {
            assert_eq!(format!("{id}"), name);
            assert_eq!(name.parse::<DroppableId>().as_ref(), Ok(id));
        }
    }

    #[test]
    fn dropzone_owner_only_for_dropzones() {
        let id = DroppableId::Dropzone("w-2".into());
        assert_eq!(id.dropzone_owner().map(ItemId::as_str), Some("w-2"));
        assert_eq!(DroppableId::Main.dropzone_owner(), None);
        assert_eq!(DroppableId::Nested("w-2".into()).dropzone_owner(), None);
    }
}
