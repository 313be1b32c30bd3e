//! Shift-click range selection over an ordered item list
//!
//! [`SelectionAnchor::reduce`] is the pure reducer; [`RangeSelector`] wraps it
//! with the current [`ItemIndex`] and decides what to do with clicks on items
//! that are no longer listed.
//!
//! # Examples
//!
//! ```
//! use tagsel::config::StaleItemPolicy;
//! use tagsel::range::{ItemSelection, RangeSelector};
//! use tagsel::types::ItemId;
//!
//! let ids = [1, 2, 3, 4, 5].map(ItemId);
//! let mut selector = RangeSelector::new(ids, StaleItemPolicy::Strict)?;
//! let mut selection = ItemSelection::new();
//!
//! selection.apply(&selector.on_item_click(ItemId(2), false)?);
//! selection.apply(&selector.on_item_click(ItemId(4), true)?);
//!
//! assert_eq!(selection.in_order(selector.index()), [2, 3, 4].map(ItemId));
//! # Ok::<(), tagsel::range::RangeError>(())
//! ```

pub mod anchor;
pub mod error;
pub mod index;
pub mod selection;

pub use anchor::{Click, ClickOutcome, SelectionAnchor};
pub use error::{RangeError, Result};
pub use index::ItemIndex;
pub use selection::ItemSelection;

use crate::config::StaleItemPolicy;
use crate::types::ItemId;
use tracing::{debug, warn};

/// Stateful range selector for one browsing context
#[derive(Debug, Clone)]
pub struct RangeSelector {
    index: ItemIndex,
    anchor: SelectionAnchor,
    policy: StaleItemPolicy,
}

impl RangeSelector {
    /// # Errors
    ///
    /// Returns `RangeError::DuplicateItem` if an id is listed twice.
    pub fn new<I>(ids: I, policy: StaleItemPolicy) -> Result<Self>
    where
        I: IntoIterator<Item = ItemId>,
    {
        Ok(Self {
            index: ItemIndex::new(ids)?,
            anchor: SelectionAnchor::new(),
            policy,
        })
    }

    /// Handle a click and return the ids to toggle, in list order
    ///
    /// # Errors
    ///
    /// Under [`StaleItemPolicy::Strict`], returns `RangeError::UnknownItem` if
    /// the click or the anchor refers to an item missing from the list. Under
    /// [`StaleItemPolicy::Warn`] the click is ignored instead.
    pub fn on_item_click(&mut self, item_id: ItemId, shift: bool) -> Result<Vec<ItemId>> {
        let click = Click { item_id, shift };
        match self.anchor.reduce(&self.index, click) {
            Ok(outcome) => {
                self.anchor = outcome.anchor;
                Ok(outcome.toggled)
            }
            Err(error @ RangeError::UnknownItem(_)) if self.policy == StaleItemPolicy::Warn => {
                warn!(item = %item_id, shift, %error, "ignoring click on stale item");
                Ok(Vec::new())
            }
            Err(error) => Err(error),
        }
    }

    /// Swap in a new list; the anchor is reset
    ///
    /// # Errors
    ///
    /// Returns `RangeError::DuplicateItem` if an id is listed twice; the old
    /// list and anchor are kept in that case.
    pub fn replace_items<I>(&mut self, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = ItemId>,
    {
        self.index = ItemIndex::new(ids)?;
        self.anchor = SelectionAnchor::new();
        debug!(items = self.index.len(), "replaced item list");
        Ok(())
    }

    #[must_use]
    pub const fn anchor(&self) -> SelectionAnchor {
        self.anchor
    }

    #[must_use]
    pub const fn index(&self) -> &ItemIndex {
        &self.index
    }

    #[must_use]
    pub const fn policy(&self) -> StaleItemPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: StaleItemPolicy) {
        self.policy = policy;
    }
}
