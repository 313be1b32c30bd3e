//! Tri-state display computation for the tag tree
//!
//! Every node of the taxonomy gets a [`NodeDisplayState`] derived from the
//! session's stats snapshot and the user's pending edit:
//!
//! - **checked**: explicitly added, or already carried by every target
//! - **indeterminate**: carried by some targets and the user has not decided
//! - **disabled**: implied by a strict ancestor carried by every target
//!
//! Nodes are computed in pre-order. The only thing a child takes from its
//! parent is the disabled signal, which is passed down when the parent is
//! disabled itself or carried by every target.

use crate::editor::PendingEdit;
use crate::stats::TagStatsSnapshot;
use crate::taxonomy::{TagNode, TagTaxonomy};
use crate::types::TagId;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};

/// What a checkbox for one tag should show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NodeDisplayState {
    pub checked: bool,
    pub indeterminate: bool,
    pub disabled: bool,
    /// Number of targets carrying the tag
    pub count: usize,
}

/// Compute the display state of a single tag
#[must_use]
pub fn compute_node(
    tag: TagId,
    stats: &TagStatsSnapshot,
    pending: &PendingEdit,
    inherited_disabled: bool,
) -> NodeDisplayState {
    let added = pending.is_added(tag);
    let decided = added || pending.is_deleted(tag);

    NodeDisplayState {
        checked: added || stats.is_fully_applied(tag),
        indeterminate: !decided && stats.is_partially_applied(tag),
        disabled: inherited_disabled || stats.is_ancestor_marked(tag),
        count: stats.count(tag),
    }
}

/// A tag with its computed state and subtree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayNode {
    pub id: TagId,
    pub name: String,
    pub full_name: String,
    pub depth: usize,
    pub state: NodeDisplayState,
    pub children: Vec<DisplayNode>,
}

impl DisplayNode {
    fn collect_visible(&self, expanded: Option<&HashSet<TagId>>, output: &mut Vec<DisplayRow>) {
        let is_expanded = expanded.is_none_or(|set| set.contains(&self.id));
        output.push(DisplayRow {
            id: self.id,
            name: self.name.clone(),
            depth: self.depth,
            has_children: !self.children.is_empty(),
            is_expanded,
            state: self.state,
        });

        if is_expanded {
            for child in &self.children {
                child.collect_visible(expanded, output);
            }
        }
    }
}

/// One line of a flattened tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub id: TagId,
    pub name: String,
    pub depth: usize,
    pub has_children: bool,
    pub is_expanded: bool,
    pub state: NodeDisplayState,
}

/// Display states for a whole taxonomy
#[derive(Debug, Clone, Default)]
pub struct DisplayTree {
    roots: Vec<DisplayNode>,
    states: HashMap<TagId, NodeDisplayState>,
}

impl DisplayTree {
    /// Compute every node's state, parents before children
    #[must_use]
    pub fn compute(
        taxonomy: &TagTaxonomy,
        stats: &TagStatsSnapshot,
        pending: &PendingEdit,
    ) -> Self {
        let mut states = HashMap::with_capacity(taxonomy.len());
        let roots = taxonomy
            .roots()
            .iter()
            .map(|root| build_node(root, 0, stats, pending, false, &mut states))
            .collect();
        Self { roots, states }
    }

    #[must_use]
    pub fn roots(&self) -> &[DisplayNode] {
        &self.roots
    }

    /// State of a single tag, if it is part of the taxonomy
    #[must_use]
    pub fn state(&self, tag: TagId) -> Option<NodeDisplayState> {
        self.states.get(&tag).copied()
    }

    /// Ids currently shown as checked
    #[must_use]
    pub fn checked_ids(&self) -> BTreeSet<TagId> {
        self.states
            .iter()
            .filter_map(|(&tag, state)| state.checked.then_some(tag))
            .collect()
    }

    /// Flatten with only the nodes in `expanded` showing their children
    #[must_use]
    pub fn visible_rows(&self, expanded: &HashSet<TagId>) -> Vec<DisplayRow> {
        let mut rows = Vec::new();
        for root in &self.roots {
            root.collect_visible(Some(expanded), &mut rows);
        }
        rows
    }

    /// Flatten with every node expanded
    #[must_use]
    pub fn all_rows(&self) -> Vec<DisplayRow> {
        let mut rows = Vec::with_capacity(self.states.len());
        for root in &self.roots {
            root.collect_visible(None, &mut rows);
        }
        rows
    }
}

fn build_node(
    node: &TagNode,
    depth: usize,
    stats: &TagStatsSnapshot,
    pending: &PendingEdit,
    inherited_disabled: bool,
    states: &mut HashMap<TagId, NodeDisplayState>,
) -> DisplayNode {
    let state = compute_node(node.id, stats, pending, inherited_disabled);
    states.insert(node.id, state);

    let disable_children = state.disabled || stats.is_fully_applied(node.id);
    let children = node
        .children
        .iter()
        .map(|child| build_node(child, depth + 1, stats, pending, disable_children, states))
        .collect();

    DisplayNode {
        id: node.id,
        name: node.name.clone(),
        full_name: node.full_name.clone(),
        depth,
        state,
        children,
    }
}
