use crate::types::TagId;
use thiserror::Error;

/// Errors raised while assembling a tag taxonomy
#[derive(Debug, Error)]
pub enum TaxonomyError {
    /// The same id appears on more than one node
    #[error("Duplicate tag id: {0}")]
    DuplicateId(TagId),

    /// A record references a parent that does not exist
    #[error("Tag {tag} references unknown parent {parent}")]
    UnknownParent { tag: TagId, parent: TagId },

    /// A node's parent link disagrees with its position in the tree
    #[error("Tag {tag} declares parent {declared:?} but is placed under {actual:?}")]
    ParentMismatch {
        tag: TagId,
        declared: Option<TagId>,
        actual: Option<TagId>,
    },

    /// Records whose parent chain never reaches a root
    #[error("Tag {0} is part of a parent cycle")]
    Cycle(TagId),
}

/// Type alias for cleaner function signatures
pub type Result<T> = std::result::Result<T, TaxonomyError>;
