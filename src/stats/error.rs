//! Snapshot validation errors
//!
//! A stats snapshot that breaks these rules points at a coordination bug
//! between the engine and whoever fetched the stats (usually a stale target
//! list). They are reported instead of corrected.

use crate::types::TagId;
use thiserror::Error;

/// Errors raised at the stats snapshot boundary
#[derive(Debug, Error)]
pub enum StatsError {
    /// A count or ancestor mark refers to a tag outside the taxonomy
    #[error("Stats reference unknown tag {0}")]
    UnknownTag(TagId),

    /// More targets carry the tag than are being edited
    #[error("Tag {tag} is counted on {count} targets but only {target_count} are selected")]
    CountExceedsTargets {
        tag: TagId,
        count: usize,
        target_count: usize,
    },

    /// An ancestor-marked tag has no fully applied strict ancestor
    #[error("Tag {0} is marked as implied but no ancestor is applied to every target")]
    OrphanAncestorMark(TagId),
}

/// Type alias for cleaner function signatures
pub type Result<T> = std::result::Result<T, StatsError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
