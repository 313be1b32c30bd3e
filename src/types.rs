//! Identity types shared by the tag engine and the range selector
//!
//! Tags and targets (files, directories, search hits) are both identified by
//! integers on the wire. These wrappers keep the two id spaces apart so a
//! target id can never be passed where a tag id is expected.
//!
//! # Examples
//!
//! ```
//! use tagsel::types::{ItemId, TagId};
//!
//! let tag = TagId(3);
//! let item = ItemId(3);
//! assert_eq!(tag.to_string(), "3");
//! assert_eq!(u64::from(item), 3);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a tag in the taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(pub u64);

/// Identity of a selectable target (file, directory or search result)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TagId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<TagId> for u64 {
    fn from(id: TagId) -> Self {
        id.0
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ItemId> for u64 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}
