//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gamecat")]
#[command(about = "Keep a game catalog spreadsheet in sync with Steam, Metacritic and HowLongToBeat", long_about = None)]
pub(crate) struct Cli {
    /// Config file (defaults to ~/.config/gamecat/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Row selection shared by the review and completion-time syncs.
#[derive(Args, Clone)]
pub(crate) struct SyncArgs {
    /// Only visit rows still missing the data this source provides
    #[arg(short, long)]
    pub partial: bool,

    /// Maximum number of rows to send to the source
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Cap the run at the configured test-mode row limit
    #[arg(long, conflicts_with = "limit")]
    pub test_mode: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Write a default config and install the SQL scripts
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Check every sheet row against the configured vocabulary
    Validate,

    /// Rebuild the database from the sheet
    Rebuild,

    /// Pull data from an external source into the sheet
    Sync {
        #[command(subcommand)]
        source: SyncSource,
    },

    /// Steam library tools
    Steam {
        #[command(subcommand)]
        action: SteamAction,
    },

    /// Query the rebuilt database
    Query {
        #[command(subcommand)]
        action: QueryAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective configuration and where each token comes from
    Show,

    /// Print the config file path
    Path,
}

#[derive(Subcommand)]
pub(crate) enum SyncSource {
    /// Playtime, last launch and status from the Steam library
    Steam,

    /// Release date and scores from Metacritic
    Metacritic {
        #[command(flatten)]
        args: SyncArgs,
    },

    /// Average completion time from HowLongToBeat
    Hltb {
        #[command(flatten)]
        args: SyncArgs,
    },
}

#[derive(Subcommand)]
pub(crate) enum SteamAction {
    /// Compare the library with the sheet without writing anything
    Check,

    /// Add owned games to the sheet by exact name
    Add {
        /// Game names as they appear in the library
        #[arg(required = true)]
        names: Vec<String>,
    },
}

#[derive(Subcommand)]
pub(crate) enum QueryAction {
    /// Search games by name
    Game {
        /// Part of the game name
        term: String,
    },

    /// Not-started games on a platform, best press score first
    List {
        /// Platform name as it appears in the sheet
        #[arg(short, long, default_value = "Steam")]
        platform: String,

        /// Number of games to skip
        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// Number of games to show
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },

    /// Completed-game count and play time on a platform
    Stats {
        /// Platform name as it appears in the sheet
        #[arg(short, long, default_value = "Steam")]
        platform: String,

        /// Count time over every game, not only completed ones
        #[arg(long)]
        all: bool,
    },

    /// List platform names known to the database
    Platforms,
}
