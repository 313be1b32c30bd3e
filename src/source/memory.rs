//! JSON-backed catalog implementing both collaborator traits
//!
//! The catalog file holds flat tag rows, items, and per-item tag
//! assignments:
//!
//! ```json
//! {
//!   "tags": [{ "id": 1, "name": "Series" }, { "id": 2, "name": "Frieren", "parent_id": 1 }],
//!   "items": [{ "id": 11, "name": "image_11.png", "directory": 10 }],
//!   "assignments": { "11": [2] }
//! }
//! ```
//!
//! Assignments store only tags applied directly. Implied tags are derived
//! when stats are fetched.

use super::error::{Result, SourceError};
use super::{ItemSource, ListContext, ListedItem, TagSource};
use crate::stats::{TagStatsResponse, tally};
use crate::taxonomy::{TagNode, TagRecord, TagTaxonomy};
use crate::types::{ItemId, TagId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A selectable entry in the catalog (an image, a directory)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    /// Containing directory, if any
    #[serde(default)]
    pub directory: Option<ItemId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryCatalog {
    #[serde(default)]
    tags: Vec<TagRecord>,
    #[serde(default)]
    items: Vec<CatalogItem>,
    #[serde(default)]
    assignments: BTreeMap<ItemId, BTreeSet<TagId>>,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl InMemoryCatalog {
    /// Create a catalog with the given tag rows and no items
    #[must_use]
    pub fn new(tags: Vec<TagRecord>) -> Self {
        Self {
            tags,
            ..Self::default()
        }
    }

    /// Load a catalog from a JSON file, or start an empty one if it does not exist
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let mut catalog = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };
        catalog.path = Some(path.to_path_buf());
        debug!(
            path = %path.display(),
            tags = catalog.tags.len(),
            items = catalog.items.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Save the catalog to the path it was loaded from
    ///
    /// # Errors
    /// Returns error if no path is set or the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let path = self.path.as_ref().ok_or_else(|| {
            SourceError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Catalog path not set",
            ))
        })?;
        self.save_to(path)
    }

    /// Save the catalog to an explicit path
    ///
    /// # Errors
    /// Returns error if the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append an item; an existing item with the same id is replaced in place
    pub fn add_item(&mut self, id: ItemId, name: impl Into<String>, directory: Option<ItemId>) {
        let item = CatalogItem {
            id,
            name: name.into(),
            directory,
        };
        match self.items.iter_mut().find(|existing| existing.id == id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    /// Directly apply `tags` to `item`, keeping tags it already carries
    pub fn assign(&mut self, item: ItemId, tags: &[TagId]) {
        self.assignments
            .entry(item)
            .or_default()
            .extend(tags.iter().copied());
    }

    #[must_use]
    pub fn tag_records(&self) -> &[TagRecord] {
        &self.tags
    }

    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Tags applied directly to `item`, in ascending id order
    #[must_use]
    pub fn tags_of(&self, item: ItemId) -> Vec<TagId> {
        self.assignments
            .get(&item)
            .map(|tags| tags.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Assemble the stored tag rows into a taxonomy
    ///
    /// # Errors
    /// Returns `SourceError::Taxonomy` if the rows do not form a forest.
    pub fn taxonomy(&self) -> Result<TagTaxonomy> {
        Ok(TagTaxonomy::from_records(self.tags.clone())?)
    }

    fn require_item(&self, id: ItemId) -> Result<()> {
        if self.item(id).is_some() {
            Ok(())
        } else {
            Err(SourceError::UnknownTarget(id))
        }
    }
}

impl TagSource for InMemoryCatalog {
    fn fetch_tag_taxonomy(&self) -> Result<Vec<TagNode>> {
        Ok(self.taxonomy()?.roots().to_vec())
    }

    fn fetch_tag_stats(&self, target_ids: &[ItemId]) -> Result<TagStatsResponse> {
        let taxonomy = self.taxonomy()?;
        let mut per_target = Vec::with_capacity(target_ids.len());
        for &target in target_ids {
            self.require_item(target)?;
            per_target.push(self.tags_of(target));
        }
        Ok(tally(&taxonomy, &per_target)?.into())
    }

    fn commit_tag_edit(
        &mut self,
        target_ids: &[ItemId],
        added: &[TagId],
        deleted: &[TagId],
    ) -> Result<()> {
        // Validate everything before touching any assignment
        let taxonomy = self.taxonomy()?;
        for &target in target_ids {
            self.require_item(target)?;
        }
        if let Some(&unknown) = added
            .iter()
            .chain(deleted)
            .find(|&&tag| !taxonomy.contains(tag))
        {
            return Err(SourceError::UnknownTag(unknown));
        }

        for &target in target_ids {
            let tags = self.assignments.entry(target).or_default();
            tags.extend(added.iter().copied());
            for tag in deleted {
                tags.remove(tag);
            }
            if tags.is_empty() {
                self.assignments.remove(&target);
            }
        }

        debug!(
            targets = target_ids.len(),
            added = added.len(),
            deleted = deleted.len(),
            "committed tag edit"
        );
        Ok(())
    }
}

impl ItemSource for InMemoryCatalog {
    fn fetch_ordered_targets(&self, context: &ListContext) -> Result<Vec<ListedItem>> {
        let keep: Box<dyn Fn(&CatalogItem) -> bool + '_> = match *context {
            ListContext::All => Box::new(|_: &CatalogItem| true),
            ListContext::Directory(directory) => {
                self.require_item(directory)?;
                Box::new(move |item: &CatalogItem| item.directory == Some(directory))
            }
            ListContext::Tagged(tag) => {
                if !self.tags.iter().any(|record| record.id == tag) {
                    return Err(SourceError::UnknownTag(tag));
                }
                Box::new(move |item: &CatalogItem| {
                    self.assignments
                        .get(&item.id)
                        .is_some_and(|tags| tags.contains(&tag))
                })
            }
        };

        Ok(self
            .items
            .iter()
            .filter(|&item| keep(item))
            .map(|item| ListedItem {
                id: item.id,
                display_name: item.name.clone(),
            })
            .collect())
    }
}
