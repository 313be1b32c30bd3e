//! Tallying tag stats from per-target assignments
//!
//! Collaborators that hold raw `target -> tags` assignments (the in-memory
//! catalog, tests) use this to produce the aggregate the engine consumes.

use super::error::{Result, StatsError};
use crate::taxonomy::TagTaxonomy;
use crate::types::TagId;
use std::collections::{HashMap, HashSet};

/// Aggregate over a set of targets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub target_count: usize,
    /// Number of targets that directly carry each tag
    pub tag_counts: HashMap<TagId, usize>,
    /// Tags with a strict ancestor carried by every target
    pub ancestor_marked: HashSet<TagId>,
}

/// Count direct tag usage across targets and derive the implied-tag set
///
/// A tag listed twice on the same target counts once.
///
/// # Errors
///
/// Returns `StatsError::UnknownTag` if an assignment names a tag outside the
/// taxonomy.
pub fn tally(taxonomy: &TagTaxonomy, per_target: &[Vec<TagId>]) -> Result<Tally> {
    let target_count = per_target.len();
    let mut tag_counts: HashMap<TagId, usize> = HashMap::new();

    for tags in per_target {
        let unique: HashSet<TagId> = tags.iter().copied().collect();
        for tag in unique {
            if !taxonomy.contains(tag) {
                return Err(StatsError::UnknownTag(tag));
            }
            *tag_counts.entry(tag).or_default() += 1;
        }
    }

    let is_full = |tag: TagId| target_count > 0 && tag_counts.get(&tag) == Some(&target_count);
    let ancestor_marked = taxonomy
        .walk()
        .map(|node| node.id)
        .filter(|&id| taxonomy.ancestors(id).any(|ancestor| is_full(ancestor.id)))
        .collect();

    Ok(Tally {
        target_count,
        tag_counts,
        ancestor_marked,
    })
}
