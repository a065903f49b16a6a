use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamecat_catalog::CatalogConfig;
use gamecat_sources::SteamClient;
use gamecat_sync::{SteamReport, SteamSynchronizer};

use crate::CliError;
use crate::spinner::SyncSpinner;

fn steam_client(config: &CatalogConfig) -> Result<SteamClient, CliError> {
    let key = config.tokens.steam_key().unwrap_or_default();
    let id = config.tokens.steam_id().unwrap_or_default();
    Ok(SteamClient::new(&key, &id)?)
}

/// Print the fuzzy-match audit and the orphan list.
fn log_audit(report: &SteamReport) {
    let audit = report.audit_text("Steam");
    if !audit.is_empty() {
        crate::log_blank();
        for line in audit.lines() {
            log::info!("{}", line);
        }
    }
    if !report.orphans.is_empty() {
        crate::log_blank();
        log::info!(
            "{}",
            "In the sheet as Steam games but not in the library:"
                .if_supports_color(Stdout, |t| t.bold()),
        );
        for name in &report.orphans {
            log::info!("  {}", name.if_supports_color(Stdout, |t| t.dimmed()));
        }
    }
}

/// Refresh playtime and status from the Steam library.
pub(crate) fn run_steam_sync(config: &CatalogConfig, quiet: bool) -> Result<(), CliError> {
    let synchronizer = SteamSynchronizer::new(config, steam_client(config)?)?;
    let spinner = SyncSpinner::new(quiet);
    let report = synchronizer.synchronize(&spinner)?;
    drop(spinner);

    log::info!(
        "{} Steam sync succeeded: {} owned, {} matched, {} updated, {} missing",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        report.owned,
        report.matched,
        report.updated,
        report.missing.len(),
    );
    if let Some(rebuild) = &report.rebuild {
        super::log_rebuild(rebuild);
    }
    log_audit(&report);
    Ok(())
}

/// Compare the library with the sheet without writing.
pub(crate) fn run_steam_check(config: &CatalogConfig, quiet: bool) -> Result<(), CliError> {
    let synchronizer = SteamSynchronizer::new(config, steam_client(config)?)?;
    let spinner = SyncSpinner::new(quiet);
    let report = synchronizer.check(&spinner)?;
    drop(spinner);

    log::info!(
        "{} owned, {} in the sheet, {} missing",
        report.owned,
        report.matched,
        report.missing.len(),
    );
    log_audit(&report);
    Ok(())
}

/// Append owned games to the sheet.
pub(crate) fn run_steam_add(config: &CatalogConfig, names: &[String], quiet: bool) -> Result<(), CliError> {
    let synchronizer = SteamSynchronizer::new(config, steam_client(config)?)?;
    let spinner = SyncSpinner::new(quiet);
    let report = synchronizer.add_games(names, &spinner)?;
    drop(spinner);

    for name in &report.added {
        log::info!(
            "  {} {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            name.if_supports_color(Stdout, |t| t.bold()),
        );
    }
    for name in &report.already_present {
        log::info!(
            "  {} {} (already in the sheet)",
            "\u{2022}".if_supports_color(Stdout, |t| t.dimmed()),
            name,
        );
    }
    for name in &report.not_owned {
        log::warn!(
            "  {} {} (not in the Steam library)",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            name,
        );
    }
    if let Some(rebuild) = &report.rebuild {
        super::log_rebuild(rebuild);
    }
    Ok(())
}
