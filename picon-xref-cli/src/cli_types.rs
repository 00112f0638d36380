//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "picon-xref")]
#[command(
    about = "Cross-reference picon logo files against the rytec channel list",
    long_about = None
)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the channel list comes from.
#[derive(Args, Clone, Debug, Default)]
pub(crate) struct XmlSourceArgs {
    /// Read the channel list from this file instead of downloading it
    #[arg(long)]
    pub xml_file: Option<PathBuf>,

    /// Download sources again even when cached
    #[arg(long)]
    pub refresh: bool,
}

/// Overrides for suggestion ranking.
#[derive(Args, Clone, Debug, Default)]
pub(crate) struct MatchArgs {
    /// Minimum similarity score for a suggestion
    #[arg(long)]
    pub min_score: Option<u32>,

    /// Maximum number of suggestions per logo
    #[arg(long)]
    pub max_suggestions: Option<usize>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Reconcile logo files against the channel list and write reports
    Run {
        #[command(flatten)]
        xml: XmlSourceArgs,

        /// Read logo paths from this file (one per line) instead of the GitHub tree
        #[arg(long)]
        logos_file: Option<PathBuf>,

        /// Directory the reports are written to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        matching: MatchArgs,
    },

    /// Print the canonical forms of a service reference
    Normalize {
        /// Reference in colon (1:0:1:...) or underscore (1_0_1_...) form
        reference: String,
    },

    /// Rank channel-list entries similar to a service reference
    Suggest {
        /// Reference in colon or underscore form
        reference: String,

        #[command(flatten)]
        xml: XmlSourceArgs,

        #[command(flatten)]
        matching: MatchArgs,
    },

    /// Manage downloaded sources
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Inspect the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum CacheAction {
    /// List cached sources
    List,

    /// Remove all cached sources
    Clear,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings
    Show,

    /// Print the settings file path
    Path,
}
