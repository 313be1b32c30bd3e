//! Minimal add/delete diffs for bulk tag edits
//!
//! The diff is always taken against the snapshot baseline (tags every target
//! already carries), never against the previous selection. Selecting a tag
//! and deselecting it again therefore nets to no change for that tag.

use crate::stats::TagStatsSnapshot;
use crate::types::TagId;
use serde::Serialize;
use std::collections::BTreeSet;

/// Tags to add to and remove from every target, in ascending id order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagDiff {
    pub added: Vec<TagId>,
    pub deleted: Vec<TagId>,
}

impl TagDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty()
    }
}

/// Explicit user decisions not yet committed
///
/// An id is never in both sets: placing it in one removes it from the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PendingEdit {
    added: BTreeSet<TagId>,
    deleted: BTreeSet<TagId>,
}

impl PendingEdit {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `tag` to be added to every target
    pub fn add(&mut self, tag: TagId) {
        self.deleted.remove(&tag);
        self.added.insert(tag);
    }

    /// Mark `tag` to be removed from every target
    pub fn delete(&mut self, tag: TagId) {
        self.added.remove(&tag);
        self.deleted.insert(tag);
    }

    /// Drop any decision about `tag`
    pub fn clear(&mut self, tag: TagId) {
        self.added.remove(&tag);
        self.deleted.remove(&tag);
    }

    #[must_use]
    pub fn is_added(&self, tag: TagId) -> bool {
        self.added.contains(&tag)
    }

    #[must_use]
    pub fn is_deleted(&self, tag: TagId) -> bool {
        self.deleted.contains(&tag)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty()
    }

    pub fn added(&self) -> impl Iterator<Item = TagId> + '_ {
        self.added.iter().copied()
    }

    pub fn deleted(&self) -> impl Iterator<Item = TagId> + '_ {
        self.deleted.iter().copied()
    }

    #[must_use]
    pub fn to_diff(&self) -> TagDiff {
        TagDiff {
            added: self.added().collect(),
            deleted: self.deleted().collect(),
        }
    }
}

impl From<&TagDiff> for PendingEdit {
    fn from(diff: &TagDiff) -> Self {
        let mut pending = Self::new();
        for &tag in &diff.deleted {
            pending.delete(tag);
        }
        for &tag in &diff.added {
            pending.add(tag);
        }
        pending
    }
}

/// Diff a full selection against the snapshot baseline
///
/// `added` = selected but not carried by every target,
/// `deleted` = carried by every target but no longer selected.
#[must_use]
pub fn diff_selection(stats: &TagStatsSnapshot, selected: &BTreeSet<TagId>) -> TagDiff {
    let baseline = stats.fully_applied_ids();
    TagDiff {
        added: selected.difference(&baseline).copied().collect(),
        deleted: baseline.difference(selected).copied().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_taxonomy, snapshot_for, tags};

    fn selection(ids: &[u64]) -> BTreeSet<TagId> {
        tags(ids).into_iter().collect()
    }

    #[test]
    fn test_pending_edit_keeps_sets_disjoint() {
        let mut pending = PendingEdit::new();

        pending.add(TagId(1));
        pending.delete(TagId(1));
        assert!(pending.is_deleted(TagId(1)));
        assert!(!pending.is_added(TagId(1)));

        pending.add(TagId(1));
        assert!(pending.is_added(TagId(1)));
        assert!(!pending.is_deleted(TagId(1)));

        pending.clear(TagId(1));
        assert!(pending.is_empty());
    }

    #[test]
    fn test_diff_against_baseline() {
        let taxonomy = sample_taxonomy();
        // Frieren on both targets, Fern on one
        let stats = snapshot_for(&taxonomy, &[&[2, 7], &[2]]);

        let diff = diff_selection(&stats, &selection(&[7, 9]));
        assert_eq!(diff.added, tags(&[7, 9]));
        assert_eq!(diff.deleted, tags(&[2]));
    }

    #[test]
    fn test_unchanged_selection_is_empty_diff() {
        let taxonomy = sample_taxonomy();
        let stats = snapshot_for(&taxonomy, &[&[2, 7], &[2]]);

        assert!(diff_selection(&stats, &selection(&[2])).is_empty());
    }

    #[test]
    fn test_select_then_deselect_nets_to_nothing() {
        let taxonomy = sample_taxonomy();
        let stats = snapshot_for(&taxonomy, &[&[2], &[2, 9]]);

        let with_tag = diff_selection(&stats, &selection(&[2, 9]));
        assert_eq!(with_tag.added, tags(&[9]));

        let without_tag = diff_selection(&stats, &selection(&[2]));
        assert!(without_tag.is_empty());
    }

    #[test]
    fn test_deselect_then_reselect_nets_to_nothing() {
        let taxonomy = sample_taxonomy();
        let stats = snapshot_for(&taxonomy, &[&[2], &[2]]);

        assert_eq!(diff_selection(&stats, &selection(&[])).deleted, tags(&[2]));
        assert!(diff_selection(&stats, &selection(&[2])).is_empty());
    }

    #[test]
    fn test_diff_sets_never_overlap() {
        let taxonomy = sample_taxonomy();
        let stats = snapshot_for(&taxonomy, &[&[2, 6, 7], &[2, 6]]);

        let sequence: [&[u64]; 5] = [&[2], &[7, 9], &[], &[2, 6, 7, 8, 9], &[1, 6]];
        for ids in sequence {
            let diff = diff_selection(&stats, &selection(ids));
            let added: BTreeSet<TagId> = diff.added.iter().copied().collect();
            assert!(diff.deleted.iter().all(|tag| !added.contains(tag)));
        }
    }

    #[test]
    fn test_pending_edit_from_diff() {
        let diff = TagDiff {
            added: tags(&[3]),
            deleted: tags(&[4, 5]),
        };
        let pending = PendingEdit::from(&diff);
        assert_eq!(pending.to_diff(), diff);
    }
}
