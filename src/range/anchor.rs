//! Shift-click reducer
//!
//! A plain click (or any click before an anchor exists) toggles the clicked
//! item and makes it the anchor. A shift-click toggles the items between the
//! anchor and the clicked item, excluding the anchor, which was toggled when
//! it was set. Further shift-clicks in the same gesture only toggle the
//! symmetric difference between the previous extension and the new one, so
//! items already covered stay as they are.

use super::error::Result;
use super::index::ItemIndex;
use crate::types::ItemId;

/// Where the current range gesture started and how far it last reached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionAnchor {
    pub start_id: Option<ItemId>,
    pub last_extend_id: Option<ItemId>,
}

/// A click on a list item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Click {
    pub item_id: ItemId,
    pub shift: bool,
}

impl Click {
    #[must_use]
    pub const fn plain(item_id: ItemId) -> Self {
        Self {
            item_id,
            shift: false,
        }
    }

    #[must_use]
    pub const fn shift(item_id: ItemId) -> Self {
        Self {
            item_id,
            shift: true,
        }
    }
}

/// New anchor plus the ids whose selection flips, in list order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickOutcome {
    pub anchor: SelectionAnchor,
    pub toggled: Vec<ItemId>,
}

impl SelectionAnchor {
    /// Anchor with no gesture in progress
    #[must_use]
    pub const fn new() -> Self {
        Self {
            start_id: None,
            last_extend_id: None,
        }
    }

    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.start_id.is_some()
    }

    /// Apply a click to this anchor
    ///
    /// # Errors
    ///
    /// Returns `RangeError::UnknownItem` if the clicked item, the anchor or the
    /// previous extension is not in `index`.
    pub fn reduce(self, index: &ItemIndex, click: Click) -> Result<ClickOutcome> {
        let end = index.require(click.item_id)?;

        let start_id = match self.start_id {
            Some(start_id) if click.shift => start_id,
            _ => {
                return Ok(ClickOutcome {
                    anchor: Self {
                        start_id: Some(click.item_id),
                        last_extend_id: None,
                    },
                    toggled: vec![click.item_id],
                });
            }
        };
        let start = index.require(start_id)?;

        let toggled_positions: Vec<usize> = match self.last_extend_id {
            None => (0..index.len())
                .filter(|&i| in_extension(start, end, i))
                .collect(),
            Some(previous_id) if previous_id == click.item_id => {
                return Ok(ClickOutcome {
                    anchor: self,
                    toggled: Vec::new(),
                });
            }
            Some(previous_id) => {
                let previous = index.require(previous_id)?;
                let low = start.min(end).min(previous);
                let high = start.max(end).max(previous);
                (low..=high)
                    .filter(|&i| in_extension(start, end, i) != in_extension(start, previous, i))
                    .collect()
            }
        };

        Ok(ClickOutcome {
            anchor: Self {
                start_id: Some(start_id),
                last_extend_id: Some(click.item_id),
            },
            toggled: toggled_positions
                .into_iter()
                .filter_map(|i| index.id_at(i))
                .collect(),
        })
    }
}

/// Whether position `i` lies in the extension from `start` to `end`, anchor excluded
const fn in_extension(start: usize, end: usize, i: usize) -> bool {
    (start < i && i <= end) || (end <= i && i < start)
}
