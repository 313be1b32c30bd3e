//! Tagsel CLI application entry point
//!
//! Drives the tag selection engine against a JSON catalog.
//!
//! # Usage
//!
//! ```bash
//! # Show the tag tree for two images
//! tagsel --catalog catalog.json tree --targets 11,12
//!
//! # What would change if only tags 2 and 9 stay checked
//! tagsel diff --targets 11,12 --select 2,9
//!
//! # Commit it
//! tagsel apply --targets 11,12 --select 2,9 --yes
//!
//! # Click image 12, then shift-click image 14
//! tagsel range --directory 10 --click 12 --click +14
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/tagsel/config.toml` on Linux). `RUST_LOG` overrides the
//! configured log filter.

use tagsel::{
    TagselError,
    cli::{Cli, Commands, ConfigCommands},
    commands,
    config::{self, TagselConfig},
    source::InMemoryCatalog,
    types::TagId,
};
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, TagselError>;

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn tag_ids(ids: &[u64]) -> Vec<TagId> {
    ids.iter().copied().map(TagId).collect()
}

/// Handle the config command - manage application settings
///
/// # Errors
///
/// Returns `TagselError` if the configuration key is invalid, value parsing fails,
/// or configuration save fails.
fn handle_config_command(
    mut config: TagselConfig,
    command: &ConfigCommands,
    quiet: bool,
) -> Result<()> {
    let available = config::KEYS.join(", ");
    match command {
        ConfigCommands::Set { setting } => {
            let (key, value) = setting.split_once('=').ok_or_else(|| {
                TagselError::InvalidInput("Invalid format. Use: tagsel config set key=value".into())
            })?;
            let key = key.trim();

            config.set(key, value.trim()).map_err(|e| match e {
                ::config::ConfigError::NotFound(_) => TagselError::InvalidInput(format!(
                    "Unknown configuration key: '{key}'. Available keys: {available}"
                )),
                other => TagselError::InvalidInput(other.to_string()),
            })?;
            config.save()?;

            if !quiet {
                println!("Set {key} = {}", config.get(key)?);
            }
        }
        ConfigCommands::Get { key } => {
            let value = config.get(key).map_err(|_| {
                TagselError::InvalidInput(format!(
                    "Unknown configuration key: '{key}'. Available keys: {available}"
                ))
            })?;
            println!("{value}");
        }
    }
    Ok(())
}

/// Main entry point for the tagsel application
///
/// Loads configuration, parses command-line arguments, opens the catalog and
/// dispatches to the command handler.
///
/// # Errors
///
/// Returns `TagselError` if configuration loading fails, the catalog cannot be
/// opened, or any command handler returns an error.
fn main() -> Result<()> {
    let config = TagselConfig::load()?;
    init_logging(&config.log_filter);

    let cli = Cli::parse_args();
    let quiet = cli.quiet || config.quiet;

    if let Commands::Config { command } = &cli.command {
        return handle_config_command(config, command, quiet);
    }

    let catalog_path = cli.catalog.clone().or_else(|| config.catalog.clone()).ok_or_else(|| {
        TagselError::InvalidInput(
            "No catalog given. Use --catalog <path> or 'tagsel config set catalog=<path>'.".into(),
        )
    })?;
    let mut catalog = InMemoryCatalog::load(&catalog_path)?;

    match &cli.command {
        Commands::Tree {
            targets,
            add,
            delete,
            all,
        } => commands::tree(
            &catalog,
            &targets.item_ids(),
            &tag_ids(add),
            &tag_ids(delete),
            *all,
            quiet,
        )?,
        Commands::Diff {
            targets,
            select,
            json,
        } => commands::diff(&catalog, &targets.item_ids(), &select.tag_ids(), *json, quiet)?,
        Commands::Apply {
            targets,
            select,
            yes,
        } => commands::apply(
            &mut catalog,
            &targets.item_ids(),
            &select.tag_ids(),
            *yes,
            quiet,
        )?,
        Commands::Range { clicks, .. } => {
            let context = cli
                .command
                .list_context()
                .ok_or_else(|| TagselError::InvalidInput("Missing list context".into()))?;
            commands::range(&catalog, &context, clicks, config.stale_item_policy, quiet)?;
        }
        Commands::Config { .. } => unreachable!(),
    }

    Ok(())
}

