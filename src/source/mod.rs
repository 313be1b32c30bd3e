//! External collaborators of the engine
//!
//! The engine never talks to storage itself. It consumes these traits:
//!
//! - [`TagSource`]: fetch the taxonomy, fetch stats for a set of targets,
//!   commit an add/delete edit
//! - [`ItemSource`]: fetch the ordered list of selectable targets for a
//!   browsing context (a directory, a tag, everything)
//!
//! [`InMemoryCatalog`] is a JSON-backed implementation of both, used by the
//! command-line front end; [`MockTagSource`] is a scriptable stand-in for tests.

pub mod error;
pub mod memory;
pub mod mock;

pub use error::{Result, SourceError};
pub use memory::{CatalogItem, InMemoryCatalog};
pub use mock::{MockTagSource, RecordedCommit};

use crate::stats::TagStatsResponse;
use crate::taxonomy::TagNode;
use crate::types::{ItemId, TagId};
use serde::{Deserialize, Serialize};

/// Source of tags, per-target tag stats and the commit endpoint
pub trait TagSource {
    /// Top-level tags with their subtrees
    ///
    /// # Errors
    /// Returns `SourceError` if the taxonomy cannot be read.
    fn fetch_tag_taxonomy(&self) -> Result<Vec<TagNode>>;

    /// Tag counts and implied tags across `target_ids`
    ///
    /// # Errors
    /// Returns `SourceError` if a target is unknown or stats cannot be read.
    fn fetch_tag_stats(&self, target_ids: &[ItemId]) -> Result<TagStatsResponse>;

    /// Add `added` to and remove `deleted` from every target
    ///
    /// # Errors
    /// Returns `SourceError` if the edit could not be applied. Nothing is
    /// applied in that case.
    fn commit_tag_edit(
        &mut self,
        target_ids: &[ItemId],
        added: &[TagId],
        deleted: &[TagId],
    ) -> Result<()>;
}

/// Which ordered list of targets to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListContext {
    /// Every item the source knows about
    All,
    /// Items directly inside a directory
    Directory(ItemId),
    /// Items carrying a tag
    Tagged(TagId),
}

/// One selectable entry in an ordered target list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListedItem {
    pub id: ItemId,
    pub display_name: String,
}

/// Source of ordered target lists (directories, images, search results)
pub trait ItemSource {
    /// # Errors
    /// Returns `SourceError` if the context refers to something unknown.
    fn fetch_ordered_targets(&self, context: &ListContext) -> Result<Vec<ListedItem>>;
}
