//! Output formatting for CLI display
//!
//! Tri-state tree rows, tag diffs and range-selection toggles as colored
//! terminal lines. Quiet mode drops decoration and prints bare values.

use crate::editor::TagDiff;
use crate::taxonomy::TagTaxonomy;
use crate::tristate::{DisplayRow, NodeDisplayState};
use crate::types::{ItemId, TagId};
use colored::Colorize;

/// Checkbox marker for a node state
#[must_use]
pub const fn checkbox(state: &NodeDisplayState) -> &'static str {
    if state.checked {
        "[x]"
    } else if state.indeterminate {
        "[-]"
    } else {
        "[ ]"
    }
}

/// Format one tree row with indentation, checkbox, name and count
#[must_use]
pub fn tree_row(row: &DisplayRow, quiet: bool) -> String {
    let indent = "  ".repeat(row.depth);
    let marker = checkbox(&row.state);

    if quiet {
        return format!("{indent}{marker} {}", row.name);
    }

    let fold = match (row.has_children, row.is_expanded) {
        (false, _) => " ",
        (true, true) => "▾",
        (true, false) => "▸",
    };
    let count = if row.state.count > 0 {
        format!(" ({})", row.state.count)
    } else {
        String::new()
    };
    let line = format!("{indent}{fold} {marker} {}{count}", row.name);

    if row.state.disabled {
        line.dimmed().to_string()
    } else if row.state.checked {
        line.green().to_string()
    } else if row.state.indeterminate {
        line.yellow().to_string()
    } else {
        line
    }
}

/// Human-readable name for a tag id
#[must_use]
pub fn tag_label(taxonomy: &TagTaxonomy, tag: TagId) -> String {
    taxonomy
        .get(tag)
        .map_or_else(|| format!("#{tag}"), |entry| entry.full_name.clone())
}

/// One line per added (`+`) and deleted (`-`) tag
#[must_use]
pub fn diff_lines(diff: &TagDiff, taxonomy: &TagTaxonomy, quiet: bool) -> Vec<String> {
    if diff.is_empty() {
        return if quiet {
            Vec::new()
        } else {
            vec!["No changes".dimmed().to_string()]
        };
    }

    let added = diff.added.iter().map(|&tag| {
        let line = format!("+ {}", tag_label(taxonomy, tag));
        if quiet { line } else { line.green().to_string() }
    });
    let deleted = diff.deleted.iter().map(|&tag| {
        let line = format!("- {}", tag_label(taxonomy, tag));
        if quiet { line } else { line.red().to_string() }
    });
    added.chain(deleted).collect()
}

/// Comma separated ids, or `-` for none
#[must_use]
pub fn id_list(ids: &[ItemId]) -> String {
    if ids.is_empty() {
        "-".to_string()
    } else {
        ids.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Describe the toggles produced by one click
#[must_use]
pub fn click_line(item: ItemId, shift: bool, toggled: &[ItemId]) -> String {
    let click = if shift {
        format!("shift+{item}")
    } else {
        item.to_string()
    };
    format!("{:>10} -> toggled {}", click.bold(), id_list(toggled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_taxonomy, tags};

    fn row(depth: usize, state: NodeDisplayState) -> DisplayRow {
        DisplayRow {
            id: TagId(4),
            name: "Season 1".to_string(),
            depth,
            has_children: false,
            is_expanded: true,
            state,
        }
    }

    #[test]
    fn test_checkbox_markers() {
        let checked = NodeDisplayState {
            checked: true,
            ..NodeDisplayState::default()
        };
        let partial = NodeDisplayState {
            indeterminate: true,
            ..NodeDisplayState::default()
        };
        assert_eq!(checkbox(&checked), "[x]");
        assert_eq!(checkbox(&partial), "[-]");
        assert_eq!(checkbox(&NodeDisplayState::default()), "[ ]");
    }

    #[test]
    fn test_quiet_tree_row() {
        let state = NodeDisplayState {
            checked: true,
            count: 2,
            ..NodeDisplayState::default()
        };
        assert_eq!(tree_row(&row(2, state), true), "    [x] Season 1");
    }

    #[test]
    fn test_tree_row_shows_count() {
        let state = NodeDisplayState {
            indeterminate: true,
            count: 3,
            ..NodeDisplayState::default()
        };
        let line = tree_row(&row(1, state), false);
        assert!(line.contains("[-] Season 1 (3)"));
    }

    #[test]
    fn test_diff_lines_use_full_names() {
        let taxonomy = sample_taxonomy();
        let diff = TagDiff {
            added: tags(&[7]),
            deleted: tags(&[4, 99]),
        };

        let lines = diff_lines(&diff, &taxonomy, true);
        assert_eq!(
            lines,
            vec!["+ Character > Fern", "- Series > Frieren > Season 1", "- #99"]
        );
        assert!(diff_lines(&TagDiff::default(), &taxonomy, true).is_empty());
    }

    #[test]
    fn test_id_list() {
        assert_eq!(id_list(&[]), "-");
        assert_eq!(id_list(&[ItemId(3), ItemId(4)]), "3, 4");
    }
}
