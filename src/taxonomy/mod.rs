//! In-memory tag taxonomy
//!
//! A forest of tags with parent/child links and stable ids. The taxonomy is
//! read-only once built: a new tag produces a new taxonomy, so it can be
//! shared behind an `Arc` by every consumer of an editing session.
//!
//! Two constructors cover the two shapes a collaborator can deliver:
//! - [`TagTaxonomy::from_roots`] validates an already nested forest
//! - [`TagTaxonomy::from_records`] assembles flat `{id, name, parent_id}` rows,
//!   sorting siblings by name and deriving full names (`Series > Frieren`)
//!
//! # Examples
//!
//! ```
//! use tagsel::taxonomy::{TagRecord, TagTaxonomy};
//! use tagsel::types::TagId;
//!
//! let taxonomy = TagTaxonomy::from_records(vec![
//!     TagRecord::new(1, "Series", None),
//!     TagRecord::new(2, "Frieren", Some(1)),
//! ])?;
//!
//! assert_eq!(taxonomy.get(TagId(2)).unwrap().full_name, "Series > Frieren");
//! assert!(taxonomy.is_ancestor(TagId(1), TagId(2)));
//! # Ok::<(), tagsel::taxonomy::TaxonomyError>(())
//! ```

pub mod error;
pub mod types;

pub use error::{Result, TaxonomyError};
pub use types::{FULL_NAME_SEPARATOR, TagEntry, TagNode, TagRecord, Walk};

use crate::types::TagId;
use std::collections::{HashMap, HashSet};

/// Mapping from tag id to its indexed entry, derived by a full traversal
#[derive(Debug, Clone, Default)]
pub struct TagMap {
    entries: HashMap<TagId, TagEntry>,
}

impl TagMap {
    fn build(roots: &[TagNode]) -> Result<Self> {
        let mut map = Self::default();
        for root in roots {
            map.insert_subtree(root, None, 0)?;
        }
        Ok(map)
    }

    fn insert_subtree(
        &mut self,
        node: &TagNode,
        parent: Option<TagId>,
        depth: usize,
    ) -> Result<()> {
        if node.parent_id != parent {
            return Err(TaxonomyError::ParentMismatch {
                tag: node.id,
                declared: node.parent_id,
                actual: parent,
            });
        }

        let entry = TagEntry {
            id: node.id,
            name: node.name.clone(),
            full_name: node.full_name.clone(),
            parent_id: parent,
            depth,
            children: node.children.iter().map(|c| c.id).collect(),
        };
        if self.entries.insert(node.id, entry).is_some() {
            return Err(TaxonomyError::DuplicateId(node.id));
        }

        for child in &node.children {
            self.insert_subtree(child, Some(node.id), depth + 1)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: TagId) -> Option<&TagEntry> {
        self.entries.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: TagId) -> bool {
        self.entries.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Iterator over the strict ancestors of a tag, nearest first
pub struct Ancestors<'a> {
    map: &'a TagMap,
    next: Option<TagId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a TagEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.map.get(self.next?)?;
        self.next = entry.parent_id;
        Some(entry)
    }
}

/// Immutable tag forest with an id index
#[derive(Debug, Clone, Default)]
pub struct TagTaxonomy {
    roots: Vec<TagNode>,
    map: TagMap,
}

impl TagTaxonomy {
    /// Validate a nested forest
    ///
    /// Roots must have no parent, every child must point at the node it sits
    /// under, and ids must be unique across the forest. Empty full names are
    /// filled from the parent chain.
    ///
    /// # Errors
    ///
    /// Returns `TaxonomyError::ParentMismatch` or `TaxonomyError::DuplicateId`.
    pub fn from_roots(mut roots: Vec<TagNode>) -> Result<Self> {
        for root in &mut roots {
            fill_full_names(root, None);
        }
        let map = TagMap::build(&roots)?;
        Ok(Self { roots, map })
    }

    /// Assemble a forest from flat rows
    ///
    /// Roots keep their input order; siblings below a root are sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `TaxonomyError::DuplicateId` for repeated ids,
    /// `TaxonomyError::UnknownParent` for dangling parent links and
    /// `TaxonomyError::Cycle` for rows that never reach a root.
    pub fn from_records(records: Vec<TagRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(TaxonomyError::DuplicateId(record.id));
            }
        }

        let mut roots = Vec::new();
        let mut children_of: HashMap<TagId, Vec<TagRecord>> = HashMap::new();
        for record in records {
            match record.parent_id {
                None => roots.push(record),
                Some(parent) if !seen.contains(&parent) => {
                    return Err(TaxonomyError::UnknownParent {
                        tag: record.id,
                        parent,
                    });
                }
                Some(parent) => children_of.entry(parent).or_default().push(record),
            }
        }

        let roots: Vec<TagNode> = roots
            .into_iter()
            .map(|record| assemble(record, &mut children_of, None))
            .collect();

        // Anything left was never reached from a root.
        if let Some(stranded) = children_of.values().flatten().map(|r| r.id).min() {
            return Err(TaxonomyError::Cycle(stranded));
        }

        let map = TagMap::build(&roots)?;
        Ok(Self { roots, map })
    }

    /// Top-level tags in display order
    #[must_use]
    pub fn roots(&self) -> &[TagNode] {
        &self.roots
    }

    /// The id index
    #[must_use]
    pub const fn map(&self) -> &TagMap {
        &self.map
    }

    #[must_use]
    pub fn get(&self, id: TagId) -> Option<&TagEntry> {
        self.map.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: TagId) -> bool {
        self.map.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Pre-order traversal of every node, parents before children
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// Strict ancestors of `id`, nearest first
    #[must_use]
    pub fn ancestors(&self, id: TagId) -> Ancestors<'_> {
        Ancestors {
            map: &self.map,
            next: self.map.get(id).and_then(|entry| entry.parent_id),
        }
    }

    /// Strict descendants of `id` in pre-order
    #[must_use]
    pub fn descendants(&self, id: TagId) -> Vec<TagId> {
        let mut out = Vec::new();
        let mut stack: Vec<TagId> = self
            .map
            .get(id)
            .map(|entry| entry.children.iter().rev().copied().collect())
            .unwrap_or_default();

        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(entry) = self.map.get(next) {
                stack.extend(entry.children.iter().rev().copied());
            }
        }
        out
    }

    /// Whether `ancestor` is a strict ancestor of `descendant`
    #[must_use]
    pub fn is_ancestor(&self, ancestor: TagId, descendant: TagId) -> bool {
        self.ancestors(descendant).any(|entry| entry.id == ancestor)
    }

    /// Look a tag up by its full name (e.g. `Series > Frieren`)
    #[must_use]
    pub fn find_by_full_name(&self, full_name: &str) -> Option<&TagEntry> {
        self.walk()
            .find(|node| node.full_name == full_name)
            .and_then(|node| self.map.get(node.id))
    }
}

fn full_name_under(parent_full: Option<&str>, name: &str) -> String {
    match parent_full {
        Some(parent) => format!("{parent}{FULL_NAME_SEPARATOR}{name}"),
        None => name.to_string(),
    }
}

fn fill_full_names(node: &mut TagNode, parent_full: Option<&str>) {
    if node.full_name.is_empty() {
        node.full_name = full_name_under(parent_full, &node.name);
    }
    let full_name = node.full_name.clone();
    for child in &mut node.children {
        fill_full_names(child, Some(&full_name));
    }
}

fn assemble(
    record: TagRecord,
    children_of: &mut HashMap<TagId, Vec<TagRecord>>,
    parent_full: Option<&str>,
) -> TagNode {
    let full_name = full_name_under(parent_full, &record.name);

    let mut kids = children_of.remove(&record.id).unwrap_or_default();
    kids.sort_by(|a, b| a.name.cmp(&b.name));
    let children = kids
        .into_iter()
        .map(|kid| assemble(kid, children_of, Some(&full_name)))
        .collect();

    TagNode {
        id: record.id,
        name: record.name,
        full_name,
        parent_id: record.parent_id,
        children,
    }
}
