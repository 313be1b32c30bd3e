//! Command-line interface definitions and parsing
//!
//! This module defines the CLI for tagsel using the `clap` crate. Every
//! command runs against a JSON catalog (`--catalog`, or the `catalog` key of
//! the configuration file).
//!
//! # Commands
//!
//! - **tree**: show the tri-state tag tree for a set of targets
//! - **diff**: show the minimal add/delete edit a selection produces
//! - **apply**: commit that edit to the catalog
//! - **range**: replay plain and shift clicks over an ordered item list
//! - **config**: get or set configuration values
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use tagsel::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from(["tagsel", "diff", "--targets", "11,12", "--select", "2,9"]);
//! assert!(matches!(cli.command, Commands::Diff { .. }));
//! ```

use crate::range::Click;
use crate::source::ListContext;
use crate::types::{ItemId, TagId};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Parse a click argument: `ID` for a plain click, `+ID` for a shift-click
///
/// # Errors
///
/// Returns a message if the id is not an unsigned integer.
pub fn parse_click(value: &str) -> Result<Click, String> {
    let (shift, id) = value
        .strip_prefix('+')
        .map_or((false, value), |rest| (true, rest));
    let id: u64 = id
        .trim()
        .parse()
        .map_err(|_| format!("invalid click '{value}': expected ID or +ID"))?;
    Ok(Click {
        item_id: ItemId(id),
        shift,
    })
}

/// Targets being edited together
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Comma separated item ids
    #[arg(
        short = 't',
        long = "targets",
        value_name = "ID",
        value_delimiter = ',',
        required = true
    )]
    pub targets: Vec<u64>,
}

impl TargetArgs {
    #[must_use]
    pub fn item_ids(&self) -> Vec<ItemId> {
        self.targets.iter().copied().map(ItemId).collect()
    }
}

/// The full selection a user ends up with in the tag picker
#[derive(Args, Debug, Clone)]
pub struct SelectArgs {
    /// Comma separated tag ids that should be checked; pass `--select` alone for none
    #[arg(
        short = 's',
        long = "select",
        value_name = "TAG",
        value_delimiter = ',',
        num_args = 0..,
        required = true
    )]
    pub select: Vec<u64>,
}

impl SelectArgs {
    #[must_use]
    pub fn tag_ids(&self) -> Vec<TagId> {
        self.select.iter().copied().map(TagId).collect()
    }
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., quiet=true)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., `stale_item_policy`)
        #[arg(value_name = "KEY")]
        key: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show the tri-state tag tree for a set of targets
    Tree {
        #[command(flatten)]
        targets: TargetArgs,

        /// Tags to show as explicitly added
        #[arg(short = 'a', long = "add", value_name = "TAG", value_delimiter = ',')]
        add: Vec<u64>,

        /// Tags to show as explicitly deleted
        #[arg(short = 'd', long = "delete", value_name = "TAG", value_delimiter = ',')]
        delete: Vec<u64>,

        /// Expand every node instead of only the pre-selected ones
        #[arg(long = "all")]
        all: bool,
    },

    /// Show the tags a selection would add and delete
    Diff {
        #[command(flatten)]
        targets: TargetArgs,

        #[command(flatten)]
        select: SelectArgs,

        /// Print the diff as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Commit a selection to the catalog
    Apply {
        #[command(flatten)]
        targets: TargetArgs,

        #[command(flatten)]
        select: SelectArgs,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Replay clicks over an ordered item list
    Range {
        /// List the items of a directory
        #[arg(long = "directory", value_name = "ID", conflicts_with = "tag")]
        directory: Option<u64>,

        /// List the items carrying a tag
        #[arg(long = "tag", value_name = "TAG")]
        tag: Option<u64>,

        /// A click: `ID` for plain, `+ID` for shift (repeatable, in order)
        #[arg(
            short = 'c',
            long = "click",
            value_name = "ID|+ID",
            value_parser = parse_click,
            required = true
        )]
        clicks: Vec<Click>,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Commands {
    /// Listing context for the `range` command
    #[must_use]
    pub fn list_context(&self) -> Option<ListContext> {
        match self {
            Self::Range { directory, tag, .. } => Some(match (directory, tag) {
                (Some(directory), _) => ListContext::Directory(ItemId(*directory)),
                (None, Some(tag)) => ListContext::Tagged(TagId(*tag)),
                (None, None) => ListContext::All,
            }),
            _ => None,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "tagsel")]
#[command(version, about = "Bulk tag selection over a JSON catalog", long_about = None)]
pub struct Cli {
    /// Catalog file to use instead of the configured one
    #[arg(long = "catalog", value_name = "PATH", global = true)]
    pub catalog: Option<PathBuf>,

    /// Suppress informational output
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
