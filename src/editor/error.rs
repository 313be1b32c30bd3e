//! Tag editor error types

use crate::source::SourceError;
use crate::stats::StatsError;
use crate::taxonomy::TaxonomyError;
use crate::types::TagId;
use thiserror::Error;

/// Errors raised by a tag editing session
#[derive(Debug, Error)]
pub enum EditorError {
    /// The fetched taxonomy is malformed
    #[error("Invalid taxonomy: {0}")]
    Taxonomy(#[from] TaxonomyError),

    /// The fetched stats are inconsistent with the taxonomy or targets
    #[error("Invalid tag stats: {0}")]
    Stats(#[from] StatsError),

    /// A fetch or commit collaborator failed
    #[error("Tag source failed: {0}")]
    Source(#[from] SourceError),

    /// A selection named a tag outside the session's taxonomy
    #[error("Selected tag {0} is not part of the taxonomy")]
    UnknownTag(TagId),

    /// The stats were fetched for a different number of targets
    #[error("Stats cover {actual} targets but the session edits {expected}")]
    TargetCountMismatch { expected: usize, actual: usize },

    /// An operation was called on a session in the other selection mode
    #[error("{operation} is not available in {mode} selection mode")]
    ModeMismatch {
        operation: &'static str,
        mode: &'static str,
    },
}

/// Type alias for cleaner function signatures
pub type Result<T> = std::result::Result<T, EditorError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
