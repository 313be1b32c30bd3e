//! The set of selected items a range selector's toggles apply to

use super::index::ItemIndex;
use crate::types::ItemId;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemSelection {
    selected: HashSet<ItemId>,
}

impl ItemSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip every id in `toggled`
    pub fn apply(&mut self, toggled: &[ItemId]) {
        for &id in toggled {
            if !self.selected.remove(&id) {
                self.selected.insert(id);
            }
        }
    }

    #[must_use]
    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selected.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Selected ids in list order; ids not in `index` are skipped
    #[must_use]
    pub fn in_order(&self, index: &ItemIndex) -> Vec<ItemId> {
        index
            .ids()
            .iter()
            .copied()
            .filter(|id| self.selected.contains(id))
            .collect()
    }
}
