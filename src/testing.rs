//! Testing utilities for tagsel
//!
//! Shared fixtures for unit tests: a small anime-catalog taxonomy, stats
//! snapshots built from per-target assignments, and an ordered item list.
//!
//! Only available when compiled with `cfg(test)`.

use crate::source::InMemoryCatalog;
use crate::stats::TagStatsSnapshot;
use crate::taxonomy::{TagRecord, TagTaxonomy};
use crate::types::{ItemId, TagId};

/// Flat rows for the sample taxonomy
///
/// ```text
/// Series (1)
///   Dungeon Meshi (3)
///   Frieren (2)
///     Season 1 (4)
///     Season 2 (5)
/// Character (6)
///   Fern (7)
///   Stark (8)
/// Scenery (9)
/// ```
#[must_use]
pub fn sample_records() -> Vec<TagRecord> {
    vec![
        TagRecord::new(1, "Series", None),
        TagRecord::new(2, "Frieren", Some(1)),
        TagRecord::new(3, "Dungeon Meshi", Some(1)),
        TagRecord::new(4, "Season 1", Some(2)),
        TagRecord::new(5, "Season 2", Some(2)),
        TagRecord::new(6, "Character", None),
        TagRecord::new(7, "Fern", Some(6)),
        TagRecord::new(8, "Stark", Some(6)),
        TagRecord::new(9, "Scenery", None),
    ]
}

/// The sample taxonomy, assembled from [`sample_records`]
///
/// # Panics
/// Panics if the fixture rows stop forming a valid forest.
#[must_use]
pub fn sample_taxonomy() -> TagTaxonomy {
    TagTaxonomy::from_records(sample_records()).expect("sample taxonomy is well formed")
}

/// Build a snapshot from per-target tag id lists
///
/// # Panics
/// Panics if an assignment references a tag outside the sample taxonomy.
#[must_use]
pub fn snapshot_for(taxonomy: &TagTaxonomy, assignments: &[&[u64]]) -> TagStatsSnapshot {
    let per_target: Vec<Vec<TagId>> = assignments
        .iter()
        .map(|tags| tags.iter().copied().map(TagId).collect())
        .collect();
    TagStatsSnapshot::from_assignments(taxonomy, &per_target).expect("assignments are valid")
}

/// Convert raw integers into item ids
#[must_use]
pub fn items(ids: &[u64]) -> Vec<ItemId> {
    ids.iter().copied().map(ItemId).collect()
}

/// Convert raw integers into tag ids
#[must_use]
pub fn tags(ids: &[u64]) -> Vec<TagId> {
    ids.iter().copied().map(TagId).collect()
}

/// A catalog holding the sample taxonomy and five images in one directory
///
/// Images 11..=15 live in directory 10. Image 11 and 12 carry `Frieren`,
/// image 11 also carries `Fern`, image 13 carries `Series`.
#[must_use]
pub fn sample_catalog() -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::new(sample_records());
    catalog.add_item(ItemId(10), "screenshots", None);
    for id in 11..=15 {
        catalog.add_item(ItemId(id), format!("image_{id}.png"), Some(ItemId(10)));
    }
    catalog.assign(ItemId(11), &tags(&[2, 7]));
    catalog.assign(ItemId(12), &tags(&[2]));
    catalog.assign(ItemId(13), &tags(&[1]));
    catalog
}
