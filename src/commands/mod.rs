//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and runs the engine against the catalog.

pub mod apply;
pub mod diff;
pub mod range;
pub mod tree;

// Re-export execute functions for convenience
pub use apply::execute as apply;
pub use diff::execute as diff;
pub use range::execute as range;
pub use tree::execute as tree;

use crate::editor::{SelectionMode, TagDiff, TagEditor};
use crate::source::TagSource;
use crate::types::ItemId;
use crate::{TagselError, output};

type Result<T> = std::result::Result<T, TagselError>;

/// Open a multi-target editing session, rejecting an empty target list
fn open_editor<S: TagSource + ?Sized>(source: &S, targets: &[ItemId]) -> Result<TagEditor> {
    if targets.is_empty() {
        return Err(TagselError::InvalidInput(
            "At least one target is required".into(),
        ));
    }
    Ok(TagEditor::open(
        source,
        SelectionMode::Multi {
            target_ids: targets.to_vec(),
        },
    )?)
}

fn print_diff(editor: &TagEditor, diff: &TagDiff, quiet: bool) {
    for line in output::diff_lines(diff, editor.taxonomy(), quiet) {
        println!("{line}");
    }
}
