//! Collaborator error types
//!
//! Failures reported by tag/item sources. The engine never retries; it
//! passes these through so the caller can show an explicit error state.

use crate::stats::StatsError;
use crate::taxonomy::TaxonomyError;
use crate::types::{ItemId, TagId};
use thiserror::Error;

/// Errors from fetch and commit collaborators
#[derive(Debug, Error)]
pub enum SourceError {
    /// I/O error when reading or writing a catalog file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file could not be parsed or serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The stored tag rows do not form a valid taxonomy
    #[error("Catalog taxonomy is invalid: {0}")]
    Taxonomy(#[from] TaxonomyError),

    /// Stored assignments could not be tallied
    #[error("Catalog stats are invalid: {0}")]
    Stats(#[from] StatsError),

    /// A request named a target the source does not know
    #[error("Unknown target: {0}")]
    UnknownTarget(ItemId),

    /// A request named a tag the source does not know
    #[error("Unknown tag: {0}")]
    UnknownTag(TagId),

    /// The backing service could not be reached
    #[error("Tag service unavailable: {0}")]
    Unavailable(String),
}

/// Type alias for cleaner function signatures
pub type Result<T> = std::result::Result<T, SourceError>;
