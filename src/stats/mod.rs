//! Per-session tag statistics
//!
//! A [`TagStatsSnapshot`] records, for the targets being edited together, how
//! many of them already carry each tag and which tags are implied because a
//! strict ancestor is carried by every target. Snapshots are validated once,
//! here, and are immutable afterwards; refreshing stats produces a new one.
//!
//! # Examples
//!
//! ```
//! use std::collections::{HashMap, HashSet};
//! use tagsel::stats::TagStatsSnapshot;
//! use tagsel::taxonomy::{TagRecord, TagTaxonomy};
//! use tagsel::types::TagId;
//!
//! let taxonomy = TagTaxonomy::from_records(vec![
//!     TagRecord::new(1, "Series", None),
//!     TagRecord::new(2, "Frieren", Some(1)),
//! ])?;
//!
//! let counts = HashMap::from([(TagId(1), 2)]);
//! let implied = HashSet::from([TagId(2)]);
//! let stats = TagStatsSnapshot::new(&taxonomy, 2, counts, implied)?;
//!
//! assert!(stats.is_fully_applied(TagId(1)));
//! assert!(stats.is_ancestor_marked(TagId(2)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod error;

pub use builder::{Tally, tally};
pub use error::{Result, StatsError};

use crate::taxonomy::TagTaxonomy;
use crate::types::TagId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Stats as returned by the `FetchTagStats` collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagStatsResponse {
    #[serde(default)]
    pub tag_counts: BTreeMap<TagId, usize>,
    /// Only entries set to `true` mark a tag as implied
    #[serde(default)]
    pub ancestor_map: BTreeMap<TagId, bool>,
}

impl From<Tally> for TagStatsResponse {
    fn from(tally: Tally) -> Self {
        Self {
            tag_counts: tally.tag_counts.into_iter().collect(),
            ancestor_map: tally
                .ancestor_marked
                .into_iter()
                .map(|tag| (tag, true))
                .collect(),
        }
    }
}

/// Validated aggregate for the current set of targets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagStatsSnapshot {
    target_count: usize,
    tag_counts: HashMap<TagId, usize>,
    ancestor_marked: HashSet<TagId>,
}

impl TagStatsSnapshot {
    /// Validate and wrap raw stats
    ///
    /// # Errors
    ///
    /// - `StatsError::UnknownTag` if a count or mark names a tag outside the taxonomy
    /// - `StatsError::CountExceedsTargets` if a count is larger than `target_count`
    /// - `StatsError::OrphanAncestorMark` if a marked tag has no fully applied strict ancestor
    pub fn new(
        taxonomy: &TagTaxonomy,
        target_count: usize,
        tag_counts: HashMap<TagId, usize>,
        ancestor_marked: HashSet<TagId>,
    ) -> Result<Self> {
        for (&tag, &count) in &tag_counts {
            if !taxonomy.contains(tag) {
                return Err(StatsError::UnknownTag(tag));
            }
            if count > target_count {
                return Err(StatsError::CountExceedsTargets {
                    tag,
                    count,
                    target_count,
                });
            }
        }

        let snapshot = Self {
            target_count,
            tag_counts,
            ancestor_marked,
        };

        for &tag in &snapshot.ancestor_marked {
            if !taxonomy.contains(tag) {
                return Err(StatsError::UnknownTag(tag));
            }
            if !taxonomy
                .ancestors(tag)
                .any(|ancestor| snapshot.is_fully_applied(ancestor.id))
            {
                return Err(StatsError::OrphanAncestorMark(tag));
            }
        }

        Ok(snapshot)
    }

    /// Validate a collaborator response for `target_count` targets
    ///
    /// # Errors
    ///
    /// Same as [`TagStatsSnapshot::new`].
    pub fn from_response(
        taxonomy: &TagTaxonomy,
        target_count: usize,
        response: TagStatsResponse,
    ) -> Result<Self> {
        let ancestor_marked = response
            .ancestor_map
            .into_iter()
            .filter_map(|(tag, marked)| marked.then_some(tag))
            .collect();
        Self::new(
            taxonomy,
            target_count,
            response.tag_counts.into_iter().collect(),
            ancestor_marked,
        )
    }

    /// Tally a snapshot from each target's tag list
    ///
    /// # Errors
    ///
    /// Returns `StatsError::UnknownTag` if an assignment names an unknown tag.
    pub fn from_assignments(taxonomy: &TagTaxonomy, per_target: &[Vec<TagId>]) -> Result<Self> {
        let tally = tally(taxonomy, per_target)?;
        Ok(Self {
            target_count: tally.target_count,
            tag_counts: tally.tag_counts,
            ancestor_marked: tally.ancestor_marked,
        })
    }

    /// Stats for a session with no targets (single-select pickers)
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn target_count(&self) -> usize {
        self.target_count
    }

    /// Number of targets carrying `tag` (0 when absent)
    #[must_use]
    pub fn count(&self, tag: TagId) -> usize {
        self.tag_counts.get(&tag).copied().unwrap_or(0)
    }

    /// Carried by every target; never true when there are no targets
    #[must_use]
    pub fn is_fully_applied(&self, tag: TagId) -> bool {
        self.target_count > 0 && self.count(tag) == self.target_count
    }

    /// Carried by some but not all targets
    #[must_use]
    pub fn is_partially_applied(&self, tag: TagId) -> bool {
        let count = self.count(tag);
        count > 0 && count < self.target_count
    }

    #[must_use]
    pub fn is_ancestor_marked(&self, tag: TagId) -> bool {
        self.ancestor_marked.contains(&tag)
    }

    /// The baseline selection: tags every target already carries
    #[must_use]
    pub fn fully_applied_ids(&self) -> BTreeSet<TagId> {
        self.tag_counts
            .keys()
            .copied()
            .filter(|&tag| self.is_fully_applied(tag))
            .collect()
    }

    #[must_use]
    pub const fn tag_counts(&self) -> &HashMap<TagId, usize> {
        &self.tag_counts
    }

    #[must_use]
    pub const fn ancestor_marked(&self) -> &HashSet<TagId> {
        &self.ancestor_marked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_taxonomy, snapshot_for, tags};

    #[test]
    fn test_new_accepts_consistent_stats() {
        let taxonomy = sample_taxonomy();
        let counts = HashMap::from([(TagId(2), 3), (TagId(7), 1)]);
        let marked = HashSet::from([TagId(4), TagId(5)]);

        let stats = TagStatsSnapshot::new(&taxonomy, 3, counts, marked).unwrap();

        assert_eq!(stats.target_count(), 3);
        assert_eq!(stats.count(TagId(2)), 3);
        assert_eq!(stats.count(TagId(9)), 0);
        assert!(stats.is_fully_applied(TagId(2)));
        assert!(stats.is_partially_applied(TagId(7)));
        assert!(!stats.is_partially_applied(TagId(2)));
    }

    #[test]
    fn test_new_rejects_count_above_target_count() {
        let taxonomy = sample_taxonomy();
        let counts = HashMap::from([(TagId(2), 4)]);

        let result = TagStatsSnapshot::new(&taxonomy, 3, counts, HashSet::new());
        assert!(matches!(
            result,
            Err(StatsError::CountExceedsTargets { tag: TagId(2), count: 4, target_count: 3 })
        ));
    }

    #[test]
    fn test_new_rejects_orphan_ancestor_mark() {
        let taxonomy = sample_taxonomy();
        // Frieren only on one of two targets, so Season 1 is not implied
        let counts = HashMap::from([(TagId(2), 1)]);
        let marked = HashSet::from([TagId(4)]);

        let result = TagStatsSnapshot::new(&taxonomy, 2, counts, marked);
        assert!(matches!(result, Err(StatsError::OrphanAncestorMark(TagId(4)))));
    }

    #[test]
    fn test_new_rejects_marked_root() {
        let taxonomy = sample_taxonomy();
        let result = TagStatsSnapshot::new(&taxonomy, 1, HashMap::new(), HashSet::from([TagId(1)]));
        assert!(matches!(result, Err(StatsError::OrphanAncestorMark(TagId(1)))));
    }

    #[test]
    fn test_new_rejects_unknown_tags() {
        let taxonomy = sample_taxonomy();

        let counted = TagStatsSnapshot::new(
            &taxonomy,
            1,
            HashMap::from([(TagId(77), 1)]),
            HashSet::new(),
        );
        assert!(matches!(counted, Err(StatsError::UnknownTag(TagId(77)))));

        let marked =
            TagStatsSnapshot::new(&taxonomy, 1, HashMap::new(), HashSet::from([TagId(78)]));
        assert!(matches!(marked, Err(StatsError::UnknownTag(TagId(78)))));
    }

    #[test]
    fn test_from_response_ignores_false_marks() {
        let taxonomy = sample_taxonomy();
        let response = TagStatsResponse {
            tag_counts: BTreeMap::from([(TagId(6), 2)]),
            ancestor_map: BTreeMap::from([(TagId(7), true), (TagId(4), false)]),
        };

        let stats = TagStatsSnapshot::from_response(&taxonomy, 2, response).unwrap();
        assert!(stats.is_ancestor_marked(TagId(7)));
        assert!(!stats.is_ancestor_marked(TagId(4)));
    }

    #[test]
    fn test_response_from_json() {
        let json = r#"{"tag_counts": {"2": 1}, "ancestor_map": {"4": true}}"#;
        let response: TagStatsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.tag_counts.get(&TagId(2)), Some(&1));
        assert_eq!(response.ancestor_map.get(&TagId(4)), Some(&true));
    }

    #[test]
    fn test_from_assignments_matches_tally() {
        let taxonomy = sample_taxonomy();
        let stats = snapshot_for(&taxonomy, &[&[6, 9], &[6]]);

        assert_eq!(stats.target_count(), 2);
        assert!(stats.is_fully_applied(TagId(6)));
        assert!(stats.is_partially_applied(TagId(9)));
        assert!(stats.is_ancestor_marked(TagId(7)));
        assert!(stats.is_ancestor_marked(TagId(8)));
    }

    #[test]
    fn test_nothing_is_fully_applied_without_targets() {
        let taxonomy = sample_taxonomy();
        let stats =
            TagStatsSnapshot::new(&taxonomy, 0, HashMap::from([(TagId(1), 0)]), HashSet::new())
                .unwrap();

        assert!(!stats.is_fully_applied(TagId(1)));
        assert!(stats.fully_applied_ids().is_empty());
    }

    #[test]
    fn test_fully_applied_ids_sorted() {
        let taxonomy = sample_taxonomy();
        let stats = snapshot_for(&taxonomy, &[&[9, 7, 2], &[2, 9, 7], &[7, 9, 2, 3]]);
        let ids: Vec<TagId> = stats.fully_applied_ids().into_iter().collect();
        assert_eq!(ids, tags(&[2, 7, 9]));
    }
}
