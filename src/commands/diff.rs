//! Diff command - minimal edit for a selection

use super::{Result, open_editor, print_diff};
use crate::source::InMemoryCatalog;
use crate::types::{ItemId, TagId};

/// Print the tags `selected` would add and delete across `targets`
///
/// # Errors
/// Returns an error if the catalog cannot be read, a tag id is unknown,
/// or JSON serialization fails
pub fn execute(
    catalog: &InMemoryCatalog,
    targets: &[ItemId],
    selected: &[TagId],
    json: bool,
    quiet: bool,
) -> Result<()> {
    let mut editor = open_editor(catalog, targets)?;
    let outcome = editor.on_selection_changed(selected.iter().copied())?;
    let diff = outcome.diff().cloned().unwrap_or_default();

    if json {
        println!("{}", serde_json::to_string_pretty(&diff)?);
    } else {
        print_diff(&editor, &diff, quiet);
    }
    Ok(())
}
