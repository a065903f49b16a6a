//! Review-score sync: fills release date, press score, user score and the
//! review URL of each row from a review aggregator.

use gamecat_catalog::dates::review_date_to_sheet;
use gamecat_catalog::{CatalogConfig, CatalogRow, Sheet, is_unset};
use gamecat_db::CatalogRebuilder;
use gamecat_sources::{ReviewRecord, ReviewSource, SourceError};

use crate::error::SyncError;
use crate::options::{SyncMode, SyncOptions, SyncOutcome, SyncReport, apply_limit, pause_between};
use crate::progress::SyncProgress;

/// A row selected for syncing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewTarget {
    pub row_number: usize,
    pub name: String,
    pub url: String,
}

/// Rows the sync visits. Partial mode leaves out rows that already carry
/// both a press score and a user score.
pub fn select_review_targets(sheet: &Sheet, mode: SyncMode) -> Vec<ReviewTarget> {
    sheet
        .read_rows()
        .filter(|(_, row)| !row.name.is_empty())
        .filter(|(_, row)| match mode {
            SyncMode::Full => true,
            SyncMode::Partial => is_unset(&row.press_score) || is_unset(&row.user_score),
        })
        .map(|(row_number, row)| ReviewTarget {
            row_number,
            name: row.name.clone(),
            url: row.metacritic_url.clone(),
        })
        .collect()
}

/// Critic score (0-100) as the sheet shows it, on a ten-point scale.
pub fn press_score_text(critic: f64) -> String {
    format!("{:.1}", critic / 10.0)
}

/// Copy the fields present in `record` into `row`. Returns whether any cell
/// changed.
pub fn apply_review(row: &mut CatalogRow, record: &ReviewRecord) -> bool {
    let before = row.clone();
    if let Some(date) = record.release_date.as_deref().and_then(review_date_to_sheet) {
        row.release_date = date;
    }
    if let Some(critic) = record.critic_score {
        row.press_score = press_score_text(critic);
    }
    if let Some(user) = &record.user_score {
        row.user_score = user.clone();
    }
    if !record.url.is_empty() {
        row.metacritic_url = record.url.clone();
    }
    *row != before
}

pub struct ReviewSynchronizer<'a, R: ReviewSource> {
    config: &'a CatalogConfig,
    source: R,
    rebuilder: CatalogRebuilder<'a>,
    options: SyncOptions,
}

impl<'a, R: ReviewSource> ReviewSynchronizer<'a, R> {
    pub fn new(config: &'a CatalogConfig, source: R, options: SyncOptions) -> Result<Self, SyncError> {
        Ok(Self {
            config,
            source,
            rebuilder: CatalogRebuilder::new(config)?,
            options,
        })
    }

    /// Visit the selected rows, save the sheet and rebuild the database.
    ///
    /// A failed request skips its row. Rejected credentials stop the run:
    /// rows already updated are saved, the rebuild is skipped and the error
    /// returned.
    pub fn synchronize(&self, progress: &dyn SyncProgress) -> Result<SyncOutcome, SyncError> {
        let site = self.source.name();
        let mut sheet = Sheet::load(&self.config.paths.sheet)?;

        let mut targets = select_review_targets(&sheet, self.options.mode);
        apply_limit(&mut targets, self.options.limit);
        if targets.is_empty() {
            log::info!("No games need {site} data");
            return Ok(SyncOutcome::NothingToSync);
        }

        progress.on_phase(&format!("Fetching {site} data for {} games", targets.len()));
        let mut report = SyncReport::default();
        let total = targets.len();

        for (index, target) in targets.iter().enumerate() {
            progress.on_item(index + 1, total, &target.name);
            report.processed += 1;

            match self.fetch_row(target) {
                Ok(Some(record)) => {
                    let Some(mut row) = sheet.row(target.row_number).cloned() else {
                        continue;
                    };
                    let has_data = record.has_scores() || record.release_date.is_some();
                    let changed = apply_review(&mut row, &record);
                    if changed {
                        sheet.write_row(target.row_number, row)?;
                    }
                    if !has_data {
                        log::warn!("No {site} data for '{}' at {}", target.name, record.url);
                        report.not_found += 1;
                    } else if changed {
                        log::debug!("Row {} ('{}') updated", target.row_number, target.name);
                        report.updated += 1;
                    }
                }
                Ok(None) => {
                    log::warn!("'{}' not found on {site}", target.name);
                    report.not_found += 1;
                }
                Err(e) if e.is_fatal() => {
                    log::error!("{site} rejected the request, stopping: {e}");
                    sheet.save(&self.config.paths.sheet)?;
                    return Err(SyncError::from_source(site, e));
                }
                Err(e) => {
                    log::warn!("Skipping '{}': {e}", target.name);
                    report.failed += 1;
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

    /// Review data for one row, searching for its page first when the row
    /// has no usable URL. `None` when the search finds no page. A page
    /// without scores or a date still yields its URL.
    fn fetch_row(&self, target: &ReviewTarget) -> Result<Option<ReviewRecord>, SourceError> {
        let url = if !is_unset(&target.url) && self.source.is_review_url(&target.url) {
            target.url.clone()
        } else {
            match self.source.search_url(&target.name)? {
                Some(url) => url,
                None => return Ok(None),
            }
        };

        let mut record = self.source.fetch_review(&url)?;
        if record.url.is_empty() {
            record.url = url;
        }
        Ok(Some(record))
    }
}
