//! Positions of items in the current ordered list

use super::error::{RangeError, Result};
use crate::types::ItemId;
use std::collections::HashMap;

/// Ordered item ids with an id -> position lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemIndex {
    ids: Vec<ItemId>,
    positions: HashMap<ItemId, usize>,
}

impl ItemIndex {
    /// Index a list in display order
    ///
    /// # Errors
    ///
    /// Returns `RangeError::DuplicateItem` if an id appears twice.
    pub fn new<I>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = ItemId>,
    {
        let ids: Vec<ItemId> = ids.into_iter().collect();
        let mut positions = HashMap::with_capacity(ids.len());
        for (position, &id) in ids.iter().enumerate() {
            if positions.insert(id, position).is_some() {
                return Err(RangeError::DuplicateItem(id));
            }
        }
        Ok(Self { ids, positions })
    }

    #[must_use]
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Position of `id`, or `RangeError::UnknownItem`
    ///
    /// # Errors
    ///
    /// Returns `RangeError::UnknownItem` if `id` is not listed.
    pub fn require(&self, id: ItemId) -> Result<usize> {
        self.position(id).ok_or(RangeError::UnknownItem(id))
    }

    #[must_use]
    pub fn id_at(&self, position: usize) -> Option<ItemId> {
        self.ids.get(position).copied()
    }

    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.positions.contains_key(&id)
    }

    #[must_use]
    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
