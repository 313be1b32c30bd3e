//! Range command - replay clicks over an ordered item list

use super::Result;
use crate::config::StaleItemPolicy;
use crate::output;
use crate::range::{Click, ItemSelection, RangeSelector};
use crate::source::{InMemoryCatalog, ItemSource, ListContext};
use colored::Colorize;
use std::collections::HashMap;

/// Fetch the list for `context`, apply `clicks` in order and print the result
///
/// # Errors
/// Returns an error if the context is unknown, the list has duplicates, or a
/// click names an item missing from the list under the strict policy
pub fn execute(
    catalog: &InMemoryCatalog,
    context: &ListContext,
    clicks: &[Click],
    policy: StaleItemPolicy,
    quiet: bool,
) -> Result<()> {
    let items = catalog.fetch_ordered_targets(context)?;
    let names: HashMap<_, _> = items
        .iter()
        .map(|item| (item.id, item.display_name.as_str()))
        .collect();

    let mut selector = RangeSelector::new(items.iter().map(|item| item.id), policy)?;
    let mut selection = ItemSelection::new();

    for click in clicks {
        let toggled = selector.on_item_click(click.item_id, click.shift)?;
        selection.apply(&toggled);
        if !quiet {
            println!("{}", output::click_line(click.item_id, click.shift, &toggled));
        }
    }

    let selected = selection.in_order(selector.index());
    if !quiet {
        println!("{} ({})", "Selected".bold(), selected.len());
    }
    for id in selected {
        let name = names.get(&id).copied().unwrap_or_default();
        if quiet {
            println!("{id}");
        } else {
            println!("  {name} ({id})");
        }
    }
    Ok(())
}
