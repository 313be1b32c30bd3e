//! Tag editing sessions
//!
//! A [`TagEditor`] owns everything a tag picker needs for one editing
//! context: the taxonomy, the stats snapshot for the targets being edited,
//! and the user's pending edit. Both the taxonomy and the snapshot are shared
//! immutably; a commit swaps in a freshly fetched snapshot instead of
//! mutating the old one.
//!
//! The selection mode is fixed when the session is opened. Multi mode edits a
//! set of targets and produces add/delete diffs; single mode just resolves the
//! one tag the user picked.

pub mod diff;
pub mod error;

pub use diff::{PendingEdit, TagDiff, diff_selection};
pub use error::{EditorError, Result};

use crate::source::TagSource;
use crate::stats::TagStatsSnapshot;
use crate::taxonomy::{TagEntry, TagTaxonomy};
use crate::tristate::{DisplayTree, NodeDisplayState, compute_node};
use crate::types::{ItemId, TagId};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// How the picker behaves, decided once per session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    /// Pick at most one tag; no targets are edited
    Single,
    /// Edit the tags of every listed target at once
    Multi { target_ids: Vec<ItemId> },
}

impl SelectionMode {
    /// Targets being edited (empty in single mode)
    #[must_use]
    pub fn target_ids(&self) -> &[ItemId] {
        match self {
            Self::Single => &[],
            Self::Multi { target_ids } => target_ids,
        }
    }

    const fn name(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multi { .. } => "multi",
        }
    }
}

/// Result of a selection event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The tag the user picked, or `None` when the pick was cleared
    Single(Option<TagEntry>),
    /// Minimal edit relative to the snapshot baseline
    Multi(TagDiff),
}

impl SelectionOutcome {
    #[must_use]
    pub const fn diff(&self) -> Option<&TagDiff> {
        match self {
            Self::Multi(diff) => Some(diff),
            Self::Single(_) => None,
        }
    }

    #[must_use]
    pub const fn picked(&self) -> Option<&TagEntry> {
        match self {
            Self::Single(entry) => entry.as_ref(),
            Self::Multi(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TagEditor {
    taxonomy: Arc<TagTaxonomy>,
    stats: Arc<TagStatsSnapshot>,
    mode: SelectionMode,
    pending: PendingEdit,
    picked: Option<TagId>,
}

impl TagEditor {
    /// Create a session from an already validated taxonomy and snapshot
    ///
    /// # Errors
    ///
    /// Returns `EditorError::TargetCountMismatch` if, in multi mode, the
    /// snapshot was taken for a different number of targets.
    pub fn new(
        taxonomy: Arc<TagTaxonomy>,
        stats: Arc<TagStatsSnapshot>,
        mode: SelectionMode,
    ) -> Result<Self> {
        if let SelectionMode::Multi { target_ids } = &mode
            && stats.target_count() != target_ids.len()
        {
            return Err(EditorError::TargetCountMismatch {
                expected: target_ids.len(),
                actual: stats.target_count(),
            });
        }

        Ok(Self {
            taxonomy,
            stats,
            mode,
            pending: PendingEdit::new(),
            picked: None,
        })
    }

    /// Fetch the taxonomy (and, in multi mode, the target stats) and open a session
    ///
    /// # Errors
    ///
    /// Returns `EditorError::Source` if a fetch fails, or
    /// `EditorError::Taxonomy` / `EditorError::Stats` if the fetched data
    /// is malformed.
    pub fn open<S: TagSource + ?Sized>(source: &S, mode: SelectionMode) -> Result<Self> {
        let taxonomy = TagTaxonomy::from_roots(source.fetch_tag_taxonomy()?)?;
        let stats = match &mode {
            SelectionMode::Single => TagStatsSnapshot::empty(),
            SelectionMode::Multi { target_ids } => fetch_snapshot(source, &taxonomy, target_ids)?,
        };

        debug!(
            mode = mode.name(),
            tags = taxonomy.len(),
            targets = stats.target_count(),
            "opened tag editor"
        );
        Self::new(Arc::new(taxonomy), Arc::new(stats), mode)
    }

    #[must_use]
    pub fn taxonomy(&self) -> &Arc<TagTaxonomy> {
        &self.taxonomy
    }

    #[must_use]
    pub fn stats(&self) -> &Arc<TagStatsSnapshot> {
        &self.stats
    }

    #[must_use]
    pub const fn mode(&self) -> &SelectionMode {
        &self.mode
    }

    #[must_use]
    pub const fn pending(&self) -> &PendingEdit {
        &self.pending
    }

    #[must_use]
    pub fn target_count(&self) -> usize {
        self.mode.target_ids().len()
    }

    /// Display state of every node for the current pending edit
    #[must_use]
    pub fn display_tree(&self) -> DisplayTree {
        DisplayTree::compute(&self.taxonomy, &self.stats, &self.pending)
    }

    /// Display state of one tag, or `None` if it is not in the taxonomy
    #[must_use]
    pub fn node_display_state(&self, tag: TagId) -> Option<NodeDisplayState> {
        if !self.taxonomy.contains(tag) {
            return None;
        }
        let inherited_disabled = self.taxonomy.ancestors(tag).any(|ancestor| {
            self.stats.is_ancestor_marked(ancestor.id) || self.stats.is_fully_applied(ancestor.id)
        });
        Some(compute_node(tag, &self.stats, &self.pending, inherited_disabled))
    }

    /// Implied by an ancestor carried by every target, so not editable
    #[must_use]
    pub fn is_locked(&self, tag: TagId) -> bool {
        self.node_display_state(tag).is_some_and(|state| state.disabled)
    }

    /// Tags checked when the picker opens
    #[must_use]
    pub fn default_selected(&self) -> BTreeSet<TagId> {
        self.stats.fully_applied_ids()
    }

    /// Tags expanded when the picker opens, so every pre-checked tag is visible
    #[must_use]
    pub fn default_expanded(&self) -> BTreeSet<TagId> {
        let mut expanded = BTreeSet::new();
        for tag in self.stats.fully_applied_ids() {
            expanded.insert(tag);
            expanded.extend(self.taxonomy.ancestors(tag).map(|ancestor| ancestor.id));
        }
        expanded
    }

    /// Replace the selection and recompute the pending edit against the baseline
    ///
    /// Locked tags keep their baseline: they stay selected if every target
    /// carries them and are dropped from the selection otherwise.
    ///
    /// # Errors
    ///
    /// - `EditorError::ModeMismatch` in single mode
    /// - `EditorError::UnknownTag` if an id is not part of the taxonomy; the
    ///   pending edit is left as it was
    pub fn on_selection_changed<I>(&mut self, selected: I) -> Result<SelectionOutcome>
    where
        I: IntoIterator<Item = TagId>,
    {
        self.require_multi("on_selection_changed")?;

        let mut selected: BTreeSet<TagId> = selected.into_iter().collect();
        if let Some(&unknown) = selected.iter().find(|&&tag| !self.taxonomy.contains(tag)) {
            return Err(EditorError::UnknownTag(unknown));
        }

        selected.retain(|&tag| !self.is_locked(tag));
        selected.extend(
            self.stats
                .fully_applied_ids()
                .into_iter()
                .filter(|&tag| self.is_locked(tag)),
        );

        let diff = diff_selection(&self.stats, &selected);
        self.pending = PendingEdit::from(&diff);
        debug!(
            selected = selected.len(),
            added = diff.added.len(),
            deleted = diff.deleted.len(),
            "selection changed"
        );
        Ok(SelectionOutcome::Multi(diff))
    }

    /// Pick a single tag, or clear the pick with `None`
    ///
    /// # Errors
    ///
    /// - `EditorError::ModeMismatch` in multi mode
    /// - `EditorError::UnknownTag` if the id is not part of the taxonomy
    pub fn on_single_selection(&mut self, tag: Option<TagId>) -> Result<SelectionOutcome> {
        if let SelectionMode::Multi { .. } = self.mode {
            return Err(EditorError::ModeMismatch {
                operation: "on_single_selection",
                mode: self.mode.name(),
            });
        }

        let entry = match tag {
            None => None,
            Some(id) => Some(self.taxonomy.get(id).ok_or(EditorError::UnknownTag(id))?.clone()),
        };
        self.picked = tag;
        Ok(SelectionOutcome::Single(entry))
    }

    /// The tag picked in single mode
    #[must_use]
    pub fn picked(&self) -> Option<&TagEntry> {
        self.picked.and_then(|id| self.taxonomy.get(id))
    }

    /// Persist the pending edit through `source`
    ///
    /// An empty pending edit is not sent and returns an empty diff. After a
    /// successful commit the pending edit is cleared and stats are fetched
    /// again into a new snapshot.
    ///
    /// # Errors
    ///
    /// - `EditorError::ModeMismatch` in single mode
    /// - `EditorError::Source` if the commit fails; the pending edit is kept
    ///   so it can be retried
    /// - `EditorError::Source` / `EditorError::Stats` if the commit succeeded
    ///   but the refreshed stats could not be fetched; call
    ///   [`TagEditor::refresh`] to retry
    pub fn commit<S: TagSource + ?Sized>(&mut self, source: &mut S) -> Result<TagDiff> {
        let target_ids = self.require_multi("commit")?.to_vec();

        let diff = self.pending.to_diff();
        if diff.is_empty() {
            debug!("nothing to commit");
            return Ok(diff);
        }

        source.commit_tag_edit(&target_ids, &diff.added, &diff.deleted)?;
        debug!(
            targets = target_ids.len(),
            added = ?diff.added,
            deleted = ?diff.deleted,
            "committed pending edit"
        );
        self.pending = PendingEdit::new();

        self.stats = Arc::new(fetch_snapshot(&*source, &self.taxonomy, &target_ids)?);
        Ok(diff)
    }

    /// Fetch stats again and discard the pending edit
    ///
    /// # Errors
    ///
    /// Returns `EditorError::Source` or `EditorError::Stats` if the fetch
    /// fails; the session is left unchanged.
    pub fn refresh<S: TagSource + ?Sized>(&mut self, source: &S) -> Result<()> {
        let target_ids = self.require_multi("refresh")?;
        let stats = fetch_snapshot(source, &self.taxonomy, target_ids)?;
        self.stats = Arc::new(stats);
        self.pending = PendingEdit::new();
        Ok(())
    }

    fn require_multi(&self, operation: &'static str) -> Result<&[ItemId]> {
        match &self.mode {
            SelectionMode::Multi { target_ids } => Ok(target_ids),
            SelectionMode::Single => Err(EditorError::ModeMismatch {
                operation,
                mode: self.mode.name(),
            }),
        }
    }
}

fn fetch_snapshot<S: TagSource + ?Sized>(
    source: &S,
    taxonomy: &TagTaxonomy,
    target_ids: &[ItemId],
) -> Result<TagStatsSnapshot> {
    let response = source.fetch_tag_stats(target_ids)?;
    Ok(TagStatsSnapshot::from_response(
        taxonomy,
        target_ids.len(),
        response,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MockTagSource, SourceError};
    use crate::stats::TagStatsResponse;
    use crate::testing::{items, sample_catalog, sample_taxonomy, tags};

    fn multi(ids: &[u64]) -> SelectionMode {
        SelectionMode::Multi {
            target_ids: items(ids),
        }
    }

    fn mock_source(assignments: &[&[u64]]) -> MockTagSource {
        let taxonomy = sample_taxonomy();
        let per_target: Vec<Vec<TagId>> = assignments.iter().map(|ids| tags(ids)).collect();
        let stats = TagStatsResponse::from(crate::stats::tally(&taxonomy, &per_target).unwrap());
        MockTagSource::new(taxonomy.roots().to_vec(), stats)
    }

    fn diff_of(outcome: SelectionOutcome) -> TagDiff {
        outcome.diff().cloned().unwrap()
    }

    #[test]
    fn test_open_multi_fetches_stats() {
        let catalog = sample_catalog();
        let editor = TagEditor::open(&catalog, multi(&[11, 12])).unwrap();

        assert_eq!(editor.target_count(), 2);
        assert_eq!(editor.stats().count(TagId(2)), 2);
        assert_eq!(editor.default_selected().into_iter().collect::<Vec<_>>(), tags(&[2]));
    }

    #[test]
    fn test_open_surfaces_fetch_failure() {
        let source = mock_source(&[]).offline();
        let result = TagEditor::open(&source, multi(&[1]));
        assert!(matches!(
            result,
            Err(EditorError::Source(SourceError::Unavailable(_)))
        ));
    }

    #[test]
    fn test_open_rejects_stats_for_other_targets() {
        // Stats cover two targets, session edits one
        let source = mock_source(&[&[2], &[2]]);
        let result = TagEditor::open(&source, multi(&[11]));
        assert!(matches!(
            result,
            Err(EditorError::Stats(crate::stats::StatsError::CountExceedsTargets { .. }))
        ));
    }

    #[test]
    fn test_default_expanded_includes_ancestors() {
        let catalog = sample_catalog();
        let editor = TagEditor::open(&catalog, multi(&[11, 12])).unwrap();

        let expanded: Vec<TagId> = editor.default_expanded().into_iter().collect();
        assert_eq!(expanded, tags(&[1, 2]));
    }

    #[test]
    fn test_select_then_deselect_clears_pending() {
        let mut editor = TagEditor::open(&mock_source(&[&[2], &[2, 7]]), multi(&[1, 2])).unwrap();

        let diff = diff_of(editor.on_selection_changed(tags(&[2, 9])).unwrap());
        assert_eq!(diff.added, tags(&[9]));
        assert!(editor.pending().is_added(TagId(9)));

        let diff = diff_of(editor.on_selection_changed(tags(&[2])).unwrap());
        assert!(diff.is_empty());
        assert!(editor.pending().is_empty());
    }

    #[test]
    fn test_pending_sets_stay_disjoint_across_sequence() {
        let mut editor =
            TagEditor::open(&mock_source(&[&[2, 6], &[2, 6, 7]]), multi(&[1, 2])).unwrap();

        let sequence: [&[u64]; 4] = [&[], &[2, 9], &[6, 7], &[2, 6]];
        for ids in sequence {
            editor.on_selection_changed(tags(ids)).unwrap();
            let pending = editor.pending();
            assert!(pending.added().all(|tag| !pending.is_deleted(tag)));
        }
        assert!(editor.pending().is_empty());
    }

    #[test]
    fn test_display_state_reflects_pending_edit() {
        let mut editor = TagEditor::open(&mock_source(&[&[7], &[]]), multi(&[1, 2])).unwrap();

        let fern = editor.node_display_state(TagId(7)).unwrap();
        assert!(fern.indeterminate);
        assert!(!fern.checked);

        editor.on_selection_changed(tags(&[7])).unwrap();
        let fern = editor.node_display_state(TagId(7)).unwrap();
        assert!(fern.checked);
        assert!(!fern.indeterminate);

        assert_eq!(editor.node_display_state(TagId(99)), None);
    }

    #[test]
    fn test_node_state_matches_tree() {
        let mut editor =
            TagEditor::open(&mock_source(&[&[1, 7], &[1]]), multi(&[1, 2])).unwrap();
        editor.on_selection_changed(tags(&[9])).unwrap();

        let tree = editor.display_tree();
        for node in editor.taxonomy().walk() {
            assert_eq!(
                editor.node_display_state(node.id),
                tree.state(node.id),
                "tag {}",
                node.id
            );
        }
    }

    #[test]
    fn test_unknown_selection_is_rejected() {
        let mut editor = TagEditor::open(&mock_source(&[&[]]), multi(&[1])).unwrap();
        editor.on_selection_changed(tags(&[9])).unwrap();

        let result = editor.on_selection_changed(tags(&[9, 404]));
        assert!(matches!(result, Err(EditorError::UnknownTag(TagId(404)))));
        assert!(editor.pending().is_added(TagId(9)));
    }

    #[test]
    fn test_locked_tags_keep_baseline() {
        // Frieren on both targets implies both seasons
        let mut editor = TagEditor::open(&mock_source(&[&[2], &[2]]), multi(&[1, 2])).unwrap();
        assert!(editor.is_locked(TagId(4)));

        let diff = diff_of(editor.on_selection_changed(tags(&[2, 4])).unwrap());
        assert!(diff.is_empty());
        assert!(!editor.pending().is_added(TagId(4)));
        assert!(!editor.node_display_state(TagId(4)).unwrap().checked);
    }

    #[test]
    fn test_locked_full_tag_is_not_deleted() {
        // Series and Frieren on both targets; Frieren is implied by Series
        let mut editor =
            TagEditor::open(&mock_source(&[&[1, 2], &[1, 2]]), multi(&[1, 2])).unwrap();
        assert!(editor.is_locked(TagId(2)));
        assert!(!editor.is_locked(TagId(1)));

        let diff = diff_of(editor.on_selection_changed(tags(&[1])).unwrap());
        assert!(diff.is_empty());

        let diff = diff_of(editor.on_selection_changed(tags(&[9])).unwrap());
        assert_eq!(diff.added, tags(&[9]));
        assert_eq!(diff.deleted, tags(&[1]));
    }

    #[test]
    fn test_commit_success_refreshes_snapshot() {
        let mut catalog = sample_catalog();
        let mut editor = TagEditor::open(&catalog, multi(&[11, 12])).unwrap();
        let before = Arc::clone(editor.stats());

        editor.on_selection_changed(tags(&[9])).unwrap();
        let diff = editor.commit(&mut catalog).unwrap();

        assert_eq!(diff.added, tags(&[9]));
        assert_eq!(diff.deleted, tags(&[2]));
        assert!(editor.pending().is_empty());
        assert!(editor.stats().is_fully_applied(TagId(9)));
        assert!(!editor.stats().is_fully_applied(TagId(2)));
        // The old snapshot is untouched
        assert!(before.is_fully_applied(TagId(2)));
    }

    #[test]
    fn test_commit_failure_keeps_pending_edit() {
        let mut source = mock_source(&[&[2], &[2]]).failing_commits();
        let mut editor = TagEditor::open(&source, multi(&[1, 2])).unwrap();
        editor.on_selection_changed(tags(&[7])).unwrap();

        let result = editor.commit(&mut source);
        assert!(matches!(result, Err(EditorError::Source(_))));
        assert!(editor.pending().is_added(TagId(7)));
        assert!(editor.pending().is_deleted(TagId(2)));

        source.fail_commit = false;
        let diff = editor.commit(&mut source).unwrap();
        assert_eq!(diff.added, tags(&[7]));
        assert_eq!(source.commits.len(), 1);
    }

    #[test]
    fn test_commit_then_failed_refetch_clears_pending() {
        let mut source = mock_source(&[&[2], &[2]]).failing_fetch_after_commit();
        let mut editor = TagEditor::open(&source, multi(&[1, 2])).unwrap();
        let before = Arc::clone(editor.stats());
        editor.on_selection_changed(tags(&[2, 9])).unwrap();

        let result = editor.commit(&mut source);
        assert!(matches!(
            result,
            Err(EditorError::Source(SourceError::Unavailable(_)))
        ));
        assert_eq!(source.commits.len(), 1);
        assert!(editor.pending().is_empty());
        assert!(Arc::ptr_eq(&before, editor.stats()));

        source.fail_fetch_after_commit = false;
        editor.refresh(&source).unwrap();
        assert!(!Arc::ptr_eq(&before, editor.stats()));
    }

    #[test]
    fn test_refresh_swaps_snapshot_and_clears_pending() {
        let mut catalog = sample_catalog();
        let mut editor = TagEditor::open(&catalog, multi(&[11, 12])).unwrap();
        let before = Arc::clone(editor.stats());
        editor.on_selection_changed(tags(&[2, 9])).unwrap();

        catalog.assign(ItemId(11), &tags(&[9]));
        catalog.assign(ItemId(12), &tags(&[9]));
        editor.refresh(&catalog).unwrap();

        assert!(!Arc::ptr_eq(&before, editor.stats()));
        assert!(editor.stats().is_fully_applied(TagId(9)));
        assert!(!before.is_fully_applied(TagId(9)));
        assert!(editor.pending().is_empty());
    }

    #[test]
    fn test_failed_refresh_leaves_session_unchanged() {
        let mut source = mock_source(&[&[2], &[]]);
        let mut editor = TagEditor::open(&source, multi(&[1, 2])).unwrap();
        let before = Arc::clone(editor.stats());
        editor.on_selection_changed(tags(&[9])).unwrap();

        source.fail_fetch = true;
        let result = editor.refresh(&source);
        assert!(matches!(result, Err(EditorError::Source(_))));
        assert!(Arc::ptr_eq(&before, editor.stats()));
        assert!(editor.pending().is_added(TagId(9)));
    }

    #[test]
    fn test_refresh_requires_multi_mode() {
        let catalog = sample_catalog();
        let mut editor = TagEditor::open(&catalog, SelectionMode::Single).unwrap();
        assert!(matches!(
            editor.refresh(&catalog),
            Err(EditorError::ModeMismatch { operation: "refresh", .. })
        ));
    }

    #[test]
    fn test_empty_commit_is_not_sent() {
        let mut source = mock_source(&[&[2]]);
        let mut editor = TagEditor::open(&source, multi(&[1])).unwrap();

        let diff = editor.commit(&mut source).unwrap();
        assert!(diff.is_empty());
        assert!(source.commits.is_empty());
    }

    #[test]
    fn test_single_mode_picks_one_tag() {
        let catalog = sample_catalog();
        let mut editor = TagEditor::open(&catalog, SelectionMode::Single).unwrap();

        let outcome = editor.on_single_selection(Some(TagId(4))).unwrap();
        assert_eq!(outcome.picked().unwrap().full_name, "Series > Frieren > Season 1");
        assert_eq!(editor.picked().unwrap().id, TagId(4));

        let outcome = editor.on_single_selection(None).unwrap();
        assert_eq!(outcome, SelectionOutcome::Single(None));
        assert!(editor.picked().is_none());

        assert!(matches!(
            editor.on_single_selection(Some(TagId(404))),
            Err(EditorError::UnknownTag(TagId(404)))
        ));
    }

    #[test]
    fn test_mode_mismatch() {
        let mut catalog = sample_catalog();
        let mut single = TagEditor::open(&catalog, SelectionMode::Single).unwrap();
        assert!(matches!(
            single.on_selection_changed(tags(&[1])),
            Err(EditorError::ModeMismatch { mode: "single", .. })
        ));
        assert!(matches!(
            single.commit(&mut catalog),
            Err(EditorError::ModeMismatch { operation: "commit", .. })
        ));

        let mut multi_editor = TagEditor::open(&catalog, multi(&[11])).unwrap();
        assert!(matches!(
            multi_editor.on_single_selection(Some(TagId(1))),
            Err(EditorError::ModeMismatch { mode: "multi", .. })
        ));
    }

    #[test]
    fn test_new_rejects_target_count_mismatch() {
        let taxonomy = Arc::new(sample_taxonomy());
        let stats = Arc::new(TagStatsSnapshot::empty());
        let result = TagEditor::new(taxonomy, stats, multi(&[1, 2]));
        assert!(matches!(
            result,
            Err(EditorError::TargetCountMismatch { expected: 2, actual: 0 })
        ));
    }
}
