//! Tree command - tri-state tag tree for a set of targets

use super::{Result, open_editor};
use crate::TagselError;
use crate::editor::{EditorError, TagEditor};
use crate::output;
use crate::source::InMemoryCatalog;
use crate::types::{ItemId, TagId};
use std::collections::{BTreeSet, HashSet};

/// Print the tag tree as the picker would show it
///
/// `add` and `delete` are applied on top of the tags every target already
/// carries before the tree is computed.
///
/// # Errors
/// Returns an error if the catalog cannot be read, a tag id is unknown, or
/// a deleted tag is not carried by every target
pub fn execute(
    catalog: &InMemoryCatalog,
    targets: &[ItemId],
    add: &[TagId],
    delete: &[TagId],
    expand_all: bool,
    quiet: bool,
) -> Result<()> {
    let mut editor = open_editor(catalog, targets)?;

    if editor.taxonomy().is_empty() {
        if !quiet {
            println!("No tags in catalog.");
        }
        return Ok(());
    }

    let selection = selection_for(&editor, add, delete)?;
    editor.on_selection_changed(selection)?;

    let tree = editor.display_tree();
    let rows = if expand_all {
        tree.all_rows()
    } else {
        let expanded: HashSet<TagId> = editor.default_expanded().into_iter().collect();
        tree.visible_rows(&expanded)
    };

    if !quiet {
        println!("Tags across {} target(s):", editor.target_count());
    }
    for row in &rows {
        println!("{}", output::tree_row(row, quiet));
    }
    Ok(())
}

/// Baseline selection with `delete` removed and `add` applied
fn selection_for(editor: &TagEditor, add: &[TagId], delete: &[TagId]) -> Result<BTreeSet<TagId>> {
    let mut selection = editor.default_selected();
    for &tag in delete {
        if !editor.taxonomy().contains(tag) {
            return Err(EditorError::UnknownTag(tag).into());
        }
        if !selection.remove(&tag) {
            return Err(TagselError::InvalidInput(format!(
                "Tag {tag} is not applied to every target"
            )));
        }
    }
    selection.extend(add.iter().copied());
    Ok(selection)
}
