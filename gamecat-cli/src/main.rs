//! gamecat CLI
//!
//! Command-line interface for the game catalog: a CSV sheet of record, a
//! SQLite database rebuilt from it, and syncs against external sources.

mod cli_types;
mod commands;
mod error;
mod spinner;

use std::io::Write;
use std::path::Path;

use clap::Parser;
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use gamecat_catalog::{CatalogConfig, config_path, load_config};

use cli_types::{Cli, Commands, ConfigAction, QueryAction, SteamAction, SyncSource};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logger(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let path = cli.config.clone().unwrap_or_else(config_path);

    // Commands that must work without a valid config.
    match &cli.command {
        Commands::Init { force } => return commands::init::run_init(&path, *force),
        Commands::Config {
            action: ConfigAction::Path,
        } => {
            commands::config::run_config_path(&path);
            return Ok(());
        }
        _ => {}
    }

    let config = load_config(&path)?;
    dispatch(cli, &path, &config)
}

fn dispatch(cli: Cli, path: &Path, config: &CatalogConfig) -> Result<(), CliError> {
    let quiet = cli.quiet;
    match cli.command {
        Commands::Init { .. } => Ok(()),
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show(path, config);
                Ok(())
            }
            ConfigAction::Path => {
                commands::config::run_config_path(path);
                Ok(())
            }
        },
        Commands::Validate => commands::validate::run_validate(config),
        Commands::Rebuild => commands::rebuild::run_rebuild(config),
        Commands::Sync { source } => match source {
            SyncSource::Steam => commands::steam::run_steam_sync(config, quiet),
            SyncSource::Metacritic { args } => commands::sync::run_metacritic(config, &args, quiet),
            SyncSource::Hltb { args } => commands::sync::run_hltb(config, &args, quiet),
        },
        Commands::Steam { action } => match action {
            SteamAction::Check => commands::steam::run_steam_check(config, quiet),
            SteamAction::Add { names } => commands::steam::run_steam_add(config, &names, quiet),
        },
        Commands::Query { action } => match action {
            QueryAction::Game { term } => commands::query::run_query_game(config, &term),
            QueryAction::List {
                platform,
                offset,
                limit,
            } => commands::query::run_query_list(config, &platform, offset, limit),
            QueryAction::Stats { platform, all } => {
                commands::query::run_query_stats(config, &platform, all)
            }
            QueryAction::Platforms => commands::query::run_query_platforms(config),
        },
    }
}

/// Route `log` output to stderr.
///
/// Info lines print bare, as normal command output. Warnings and errors get
/// a colored prefix. `--verbose` adds debug lines with timestamps and
/// `RUST_LOG` overrides both flags.
fn init_logger(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(move |buf, record| {
            let prefix = match record.level() {
                Level::Error => format!("{} ", "error:".if_supports_color(Stderr, |t| t.red())),
                Level::Warn => format!("{} ", "warning:".if_supports_color(Stderr, |t| t.yellow())),
                _ => String::new(),
            };
            if verbose {
                writeln!(
                    buf,
                    "[{} {:<5}] {}{}",
                    buf.timestamp_seconds(),
                    record.level(),
                    prefix,
                    record.args()
                )
            } else {
                writeln!(buf, "{}{}", prefix, record.args())
            }
        })
        .init();
}

/// Log an empty line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}
