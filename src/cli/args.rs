//! CLI argument definitions using clap

use clap::{ArgAction, Parser, Subcommand};

/// Browse hierarchical digital-library collection metadata
#[derive(Parser, Debug)]
#[command(name = "carrel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug output (repeat for more detail)
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Backend base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all collections
    Collections,

    /// Show one collection as a tree
    Show {
        /// Collection PID
        pid: String,

        /// Open these nodes before rendering (repeatable)
        #[arg(short, long = "expand", value_name = "PID")]
        expand: Vec<String>,

        /// Render every level regardless of view state
        #[arg(short, long)]
        all: bool,

        /// Emit the normalized tree as JSON
        #[arg(long, conflicts_with_all = ["all", "expand"])]
        json: bool,
    },

    /// Search node values across all collections
    Search {
        /// Query term
        query: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init,

    /// Show config paths
    Path,
}
