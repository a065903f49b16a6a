//! Reconciliation against an ownership source (the Steam library).
//!
//! Owned games are matched to sheet rows by exact name. Matched rows get
//! their playtime, last launch date and status refreshed. Unmatched owned
//! games are only reported, together with their closest sheet name; a fuzzy
//! match is never written back.

use gamecat_catalog::config::{STATUS_ABANDONED, STATUS_NOT_STARTED};
use gamecat_catalog::dates::{epoch_to_sheet_date, hours_cell, minutes_to_hours};
use gamecat_catalog::{
    CatalogConfig, CatalogRow, NONE_VALUE, SHEET_DATE_NOT_SET, Sheet, SimilarityMatch, is_unset,
};
use gamecat_db::{CatalogRebuilder, RebuildReport};
use gamecat_sources::{OwnedGame, OwnedLibrary, OwnershipSource};

use crate::audit::{find_similar_games, format_missing_games};
use crate::error::SyncError;
use crate::progress::SyncProgress;

/// Status names the playtime rules move rows between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusNames {
    pub not_started: String,
    pub abandoned: String,
}

impl StatusNames {
    pub fn from_config(config: &CatalogConfig) -> Result<Self, SyncError> {
        let name = |key: &str| {
            config
                .status_name(key)
                .map(str::to_string)
                .ok_or_else(|| SyncError::Config(format!("status '{key}' is not configured")))
        };
        Ok(Self {
            not_started: name(STATUS_NOT_STARTED)?,
            abandoned: name(STATUS_ABANDONED)?,
        })
    }
}

/// Refresh `row` from the owned game. Returns whether any cell changed.
///
/// With playtime: personal time becomes hours (two decimals), last launch
/// the launch date, and a not-started game counts as abandoned. Without
/// playtime, and with no additional time recorded elsewhere, the row is
/// reset to never played.
pub fn apply_owned_game(row: &mut CatalogRow, game: &OwnedGame, statuses: &StatusNames) -> bool {
    let before = row.clone();
    if game.playtime_minutes > 0 {
        row.my_time_beat = hours_cell(minutes_to_hours(game.playtime_minutes));
        if let Some(date) = game.last_played.and_then(epoch_to_sheet_date) {
            row.last_launch_date = date;
        }
        if row.status == statuses.not_started {
            row.status = statuses.abandoned.clone();
        }
    } else if is_unset(&row.additional_time) {
        row.my_time_beat = NONE_VALUE.to_string();
        row.last_launch_date = SHEET_DATE_NOT_SET.to_string();
        row.status = statuses.not_started.clone();
    }
    *row != before
}

/// Names of rows listed on `platform` that the library does not contain.
pub fn find_orphans(sheet: &Sheet, library: &OwnedLibrary, platform: &str) -> Vec<String> {
    sheet
        .read_rows()
        .filter(|(_, row)| !row.name.is_empty() && row.is_on_platform(platform))
        .filter(|(_, row)| !library.contains(&row.name))
        .map(|(_, row)| row.name.clone())
        .collect()
}

/// Result of a library sync or check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SteamReport {
    /// Games in the fetched library.
    pub owned: usize,
    /// Owned games with a sheet row of the same name.
    pub matched: usize,
    /// Matched rows whose cells changed.
    pub updated: usize,
    /// Owned games without a sheet row, with their nearest sheet name.
    pub missing: Vec<SimilarityMatch>,
    /// Sheet rows on the platform that the library does not contain.
    pub orphans: Vec<String>,
    /// Set when the sync rebuilt the database.
    pub rebuild: Option<RebuildReport>,
}

impl SteamReport {
    /// The missing-games audit text (empty when nothing is missing).
    pub fn audit_text(&self, source: &str) -> String {
        format_missing_games(source, &self.missing)
    }
}

/// Result of adding named games to the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddReport {
    /// Row number the first added game went to.
    pub first_row: usize,
    pub added: Vec<String>,
    /// Names that already had a row.
    pub already_present: Vec<String>,
    /// Names the library does not contain.
    pub not_owned: Vec<String>,
    pub rebuild: Option<RebuildReport>,
}

/// Synchronizes the sheet with one ownership source.
pub struct SteamSynchronizer<'a, S: OwnershipSource> {
    config: &'a CatalogConfig,
    source: S,
    rebuilder: CatalogRebuilder<'a>,
    statuses: StatusNames,
}

impl<'a, S: OwnershipSource> SteamSynchronizer<'a, S> {
    /// Fails when the rebuild scripts or the status vocabulary are missing,
    /// before anything is fetched.
    pub fn new(config: &'a CatalogConfig, source: S) -> Result<Self, SyncError> {
        Ok(Self {
            config,
            source,
            rebuilder: CatalogRebuilder::new(config)?,
            statuses: StatusNames::from_config(config)?,
        })
    }

    /// Refresh every matched row, save the sheet and rebuild the database.
    pub fn synchronize(&self, progress: &dyn SyncProgress) -> Result<SteamReport, SyncError> {
        let mut sheet = Sheet::load(&self.config.paths.sheet)?;
        let library = self.fetch(progress)?;

        let mut report = self.reconcile(&mut sheet, &library, true)?;
        sheet.save(&self.config.paths.sheet)?;
        log::info!(
            "Updated {} of {} matched rows from {}",
            report.updated,
            report.matched,
            self.source.platform_name()
        );

        self.log_unmatched(&report);
        progress.on_phase("Rebuilding database");
        report.rebuild = Some(self.rebuilder.rebuild_configured()?);
        progress.on_complete("Steam sync complete");
        Ok(report)
    }

    /// Match and audit without writing anything.
    pub fn check(&self, progress: &dyn SyncProgress) -> Result<SteamReport, SyncError> {
        let mut sheet = Sheet::load(&self.config.paths.sheet)?;
        let library = self.fetch(progress)?;
        let report = self.reconcile(&mut sheet, &library, false)?;
        log::info!(
            "Found {} games from {} missing in the sheet",
            report.missing.len(),
            self.source.platform_name()
        );
        progress.on_complete("Steam check complete");
        Ok(report)
    }

    /// Append rows for owned games named in `names`, starting at the first
    /// free row, then save and rebuild.
    pub fn add_games(&self, names: &[String], progress: &dyn SyncProgress) -> Result<AddReport, SyncError> {
        let library = self.fetch(progress)?;
        let mut sheet = Sheet::load(&self.config.paths.sheet)?;
        let platform = self.source.platform_name();

        let mut report = AddReport {
            first_row: sheet.first_free_row(),
            ..AddReport::default()
        };
        let mut next_row = report.first_row;

        for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            if sheet.find_row_by_name(name).is_some() {
                log::warn!("'{name}' is already in the sheet, skipping");
                report.already_present.push(name.to_string());
                continue;
            }
            let Some(game) = library.find(name) else {
                log::warn!("'{name}' is not in the {platform} library, skipping");
                report.not_owned.push(name.to_string());
                continue;
            };

            let mut row = CatalogRow::new_entry(name, platform, &self.statuses.not_started);
            if game.playtime_minutes > 0 {
                apply_owned_game(&mut row, game, &self.statuses);
            }
            sheet.write_row(next_row, row)?;
            log::info!("Added '{name}' at row {next_row}");
            report.added.push(name.to_string());
            next_row += 1;
        }

        if report.added.is_empty() {
            log::info!("No games added");
            return Ok(report);
        }

        sheet.save(&self.config.paths.sheet)?;
        progress.on_phase("Rebuilding database");
        report.rebuild = Some(self.rebuilder.rebuild_configured()?);
        progress.on_complete(&format!("Added {} games", report.added.len()));
        Ok(report)
    }

    fn fetch(&self, progress: &dyn SyncProgress) -> Result<OwnedLibrary, SyncError> {
        let platform = self.source.platform_name();
        progress.on_phase(&format!("Fetching owned games from {platform}"));
        let library = self
            .source
            .owned_games()
            .map_err(|e| SyncError::from_source(platform, e))?;
        log::info!("Fetched {} games from {platform}", library.games.len());
        Ok(library)
    }

    /// Match the library against the sheet. With `apply`, matched rows are
    /// updated in `sheet`.
    fn reconcile(
        &self,
        sheet: &mut Sheet,
        library: &OwnedLibrary,
        apply: bool,
    ) -> Result<SteamReport, SyncError> {
        let mut report = SteamReport {
            owned: library.games.len(),
            ..SteamReport::default()
        };
        let mut missing = Vec::new();

        for game in &library.games {
            let Some(row_number) = sheet.find_row_by_name(&game.name) else {
                missing.push(game.name.clone());
                continue;
            };
            report.matched += 1;
            if !apply {
                continue;
            }
            let Some(mut row) = sheet.row(row_number).cloned() else {
                continue;
            };
            if apply_owned_game(&mut row, game, &self.statuses) {
                log::debug!("Row {row_number} ('{}') updated", game.name);
                sheet.write_row(row_number, row)?;
                report.updated += 1;
            }
        }

        report.missing = find_similar_games(&missing, sheet, &self.config.similarity);
        report.orphans = find_orphans(sheet, library, self.source.platform_name());
        Ok(report)
    }

    fn log_unmatched(&self, report: &SteamReport) {
        let platform = self.source.platform_name();
        if !report.missing.is_empty() {
            let names: Vec<&str> = report.missing.iter().map(|m| m.original.as_str()).collect();
            log::info!("Games from {platform} not found in the sheet: {}", names.join(", "));
        }
        if !report.orphans.is_empty() {
            log::info!(
                "Games on {platform} in the sheet but not in the library: {}",
                report.orphans.join(", ")
            );
        }
    }
}
