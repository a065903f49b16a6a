use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamecat_catalog::CatalogConfig;
use gamecat_sources::{HltbClient, MetacriticClient};
use gamecat_sync::{
    CompletionSynchronizer, ReviewSynchronizer, SyncMode, SyncOptions, SyncOutcome,
};

use crate::CliError;
use crate::cli_types::SyncArgs;
use crate::spinner::SyncSpinner;

fn sync_options(config: &CatalogConfig, args: &SyncArgs) -> SyncOptions {
    let mode = if args.partial {
        SyncMode::Partial
    } else {
        SyncMode::Full
    };
    let limit = if args.test_mode {
        Some(config.sync.test_mode_limit)
    } else {
        args.limit
    };
    SyncOptions::from_settings(&config.sync)
        .with_mode(mode)
        .with_limit(limit)
}

/// Print the one-line summary of a finished sync.
fn log_outcome(site: &str, outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::Synced(report) => {
            log::info!(
                "{} {} sync succeeded: {} processed, {} updated, {} not found, {} failed",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                site,
                report.processed,
                report.updated,
                report.not_found,
                report.failed,
            );
            super::log_rebuild(&report.rebuild);
        }
        SyncOutcome::NothingToSync => {
            log::info!(
                "{} {} sync: nothing to do",
                "\u{2022}".if_supports_color(Stdout, |t| t.dimmed()),
                site,
            );
        }
    }
}

/// Run the Metacritic review sync.
pub(crate) fn run_metacritic(config: &CatalogConfig, args: &SyncArgs, quiet: bool) -> Result<(), CliError> {
    let options = sync_options(config, args);
    let synchronizer = ReviewSynchronizer::new(config, MetacriticClient::new()?, options)?;
    let spinner = SyncSpinner::new(quiet);
    let outcome = synchronizer.synchronize(&spinner)?;
    drop(spinner);
    log_outcome("Metacritic", &outcome);
    Ok(())
}

/// Run the HowLongToBeat completion-time sync.
pub(crate) fn run_hltb(config: &CatalogConfig, args: &SyncArgs, quiet: bool) -> Result<(), CliError> {
    let options = sync_options(config, args);
    let synchronizer = CompletionSynchronizer::new(config, HltbClient::new()?, options)?;
    let spinner = SyncSpinner::new(quiet);
    let outcome = synchronizer.synchronize(&spinner)?;
    drop(spinner);
    log_outcome("HowLongToBeat", &outcome);
    Ok(())
}
