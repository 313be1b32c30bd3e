//! Tagsel - bulk tag selection engine
//!
//! This library computes what a hierarchical tag picker shows when several
//! items are edited at once, turns the user's selection into a minimal
//! add/delete edit, and implements shift-click range selection over ordered
//! item lists. Storage is reached only through the traits in [`source`].

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod editor;
pub mod output;
pub mod range;
pub mod source;
pub mod stats;
pub mod taxonomy;
pub mod tristate;
pub mod types;

#[cfg(test)]
pub mod testing;

pub use editor::{EditorError, SelectionMode, SelectionOutcome, TagDiff, TagEditor};
pub use range::{RangeError, RangeSelector};
pub use source::{ItemSource, SourceError, TagSource};
pub use types::{ItemId, TagId};

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum TagselError {
    /// Taxonomy construction error
    #[error("Taxonomy error: {0}")]
    Taxonomy(#[from] taxonomy::TaxonomyError),
    /// Stats validation error
    #[error("Stats error: {0}")]
    Stats(#[from] stats::StatsError),
    /// Tag editing session error
    #[error("Editor error: {0}")]
    Editor(#[from] editor::EditorError),
    /// Range selection error
    #[error("Range selection error: {0}")]
    Range(#[from] range::RangeError),
    /// Catalog or collaborator error
    #[error("Catalog error: {0}")]
    Source(#[from] source::SourceError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
