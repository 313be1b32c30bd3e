//! Range selection error types

use crate::types::ItemId;
use thiserror::Error;

/// Errors raised by the range selector
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    /// A click or the anchor refers to an item missing from the current list
    #[error("Item {0} is not in the current list")]
    UnknownItem(ItemId),

    /// The same item appears twice in a list
    #[error("Item {0} is listed more than once")]
    DuplicateItem(ItemId),
}

/// Type alias for cleaner function signatures
pub type Result<T> = std::result::Result<T, RangeError>;
