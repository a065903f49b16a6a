//! Completion-time sync: fills the average time to beat of each row.

use gamecat_catalog::dates::hours_cell;
use gamecat_catalog::{CatalogConfig, Sheet, is_unset};
use gamecat_db::CatalogRebuilder;
use gamecat_sources::CompletionTimeSource;

use crate::error::SyncError;
use crate::options::{SyncMode, SyncOptions, SyncOutcome, SyncReport, apply_limit, pause_between};
use crate::progress::SyncProgress;

/// Written when the site has no entry for a game, so partial runs stop
/// asking for it.
pub const NOT_FOUND_HOURS: &str = "0";

/// Rows the sync visits, as `(row number, name)`. Partial mode leaves out
/// rows that already have an average time.
pub fn select_completion_targets(sheet: &Sheet, mode: SyncMode) -> Vec<(usize, String)> {
    sheet
        .read_rows()
        .filter(|(_, row)| !row.name.is_empty())
        .filter(|(_, row)| mode == SyncMode::Full || is_unset(&row.average_time_beat))
        .map(|(n, row)| (n, row.name.clone()))
        .collect()
}

/// New average-time cell for a game the site does not know, or `None` to
/// keep the current one.
pub fn not_found_cell(current: &str, mode: SyncMode) -> Option<&'static str> {
    match mode {
        SyncMode::Partial => Some(NOT_FOUND_HOURS),
        SyncMode::Full if is_unset(current) => Some(NOT_FOUND_HOURS),
        SyncMode::Full => None,
    }
}

pub struct CompletionSynchronizer<'a, C: CompletionTimeSource> {
    config: &'a CatalogConfig,
    source: C,
    rebuilder: CatalogRebuilder<'a>,
    options: SyncOptions,
}

impl<'a, C: CompletionTimeSource> CompletionSynchronizer<'a, C> {
    pub fn new(config: &'a CatalogConfig, source: C, options: SyncOptions) -> Result<Self, SyncError> {
        Ok(Self {
            config,
            source,
            rebuilder: CatalogRebuilder::new(config)?,
            options,
        })
    }

    /// Visit the selected rows, save the sheet and rebuild the database.
    ///
    /// Failure handling matches the review sync: a failed request skips its
    /// row, a fatal one saves what was done and stops before the rebuild.
    pub fn synchronize(&self, progress: &dyn SyncProgress) -> Result<SyncOutcome, SyncError> {
        let site = self.source.name();
        let mut sheet = Sheet::load(&self.config.paths.sheet)?;

        let mut targets = select_completion_targets(&sheet, self.options.mode);
        apply_limit(&mut targets, self.options.limit);
        if targets.is_empty() {
            log::info!("No games need {site} data");
            return Ok(SyncOutcome::NothingToSync);
        }

        progress.on_phase(&format!("Fetching {site} times for {} games", targets.len()));
        let mut report = SyncReport::default();
        let total = targets.len();

        for (index, (row_number, name)) in targets.iter().enumerate() {
            progress.on_item(index + 1, total, name);
            report.processed += 1;

            let Some(mut row) = sheet.row(*row_number).cloned() else {
                continue;
            };
            let cell = match self.source.search(name) {
                Ok(Some(times)) => match times.preferred_hours() {
                    Some(hours) => {
                        log::debug!("'{name}' matched '{}' ({:.2})", times.name, times.similarity);
                        Some(hours_cell(hours))
                    }
                    None => {
                        log::warn!("'{name}' has no completion times on {site}");
                        report.not_found += 1;
                        None
                    }
                },
                Ok(None) => {
                    log::warn!("'{name}' not found on {site}");
                    report.not_found += 1;
                    not_found_cell(&row.average_time_beat, self.options.mode).map(str::to_string)
                }
                Err(e) if e.is_fatal() => {
                    log::error!("{site} rejected the request, stopping: {e}");
                    sheet.save(&self.config.paths.sheet)?;
                    return Err(SyncError::from_source(site, e));
                }
                Err(e) => {
                    log::warn!("Skipping '{name}': {e}");
                    report.failed += 1;
                    None
                }
            };

            if let Some(cell) = cell {
                if cell != row.average_time_beat {
                    row.average_time_beat = cell;
                    sheet.write_row(*row_number, row)?;
                    report.updated += 1;
                }
            }
            pause_between(index, total, self.options.delay);
        }

        sheet.save(&self.config.paths.sheet)?;
        log::info!(
            "{site}: {} processed, {} updated, {} not found, {} failed",
            report.processed,
            report.updated,
            report.not_found,
            report.failed
        );

        progress.on_phase("Rebuilding database");
        report.rebuild = self.rebuilder.rebuild_configured()?;
        progress.on_complete(&format!("{site} sync complete"));
        Ok(SyncOutcome::Synced(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_marks_partial_rows() {
        assert_eq!(not_found_cell("none", SyncMode::Partial), Some("0"));
        assert_eq!(not_found_cell("", SyncMode::Partial), Some("0"));
    }

    #[test]
    fn not_found_keeps_known_times_in_full_mode() {
        assert_eq!(not_found_cell("12.5", SyncMode::Full), None);
        assert_eq!(not_found_cell("none", SyncMode::Full), Some("0"));
    }
}
