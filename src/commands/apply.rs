//! Apply command - commit a selection to the catalog

use super::{Result, open_editor, print_diff};
use crate::TagselError;
use crate::source::InMemoryCatalog;
use crate::types::{ItemId, TagId};
use colored::Colorize;
use dialoguer::Confirm;

/// Commit the edit `selected` produces and save the catalog
///
/// Asks for confirmation unless `yes` or `quiet` is set.
///
/// # Errors
/// Returns an error if the catalog cannot be read or written, a tag id is
/// unknown, or user interaction fails
pub fn execute(
    catalog: &mut InMemoryCatalog,
    targets: &[ItemId],
    selected: &[TagId],
    yes: bool,
    quiet: bool,
) -> Result<()> {
    let mut editor = open_editor(&*catalog, targets)?;
    let outcome = editor.on_selection_changed(selected.iter().copied())?;

    if outcome.diff().is_none_or(|diff| diff.is_empty()) {
        if !quiet {
            println!("Nothing to apply.");
        }
        return Ok(());
    }

    if let Some(diff) = outcome.diff() {
        print_diff(&editor, diff, quiet);
    }

    if !yes && !quiet && !confirm(&format!("Apply to {} target(s)?", targets.len()))? {
        println!("Cancelled.");
        return Ok(());
    }

    let diff = editor.commit(catalog)?;
    catalog.save()?;

    if !quiet {
        println!(
            "{} {} added, {} deleted on {} target(s)",
            "Applied:".green().bold(),
            diff.added.len(),
            diff.deleted.len(),
            targets.len()
        );
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| TagselError::InvalidInput(format!("Confirmation failed: {e}")))
}
