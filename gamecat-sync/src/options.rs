//! Options and results shared by the review and completion-time syncs.

use std::time::Duration;

use gamecat_catalog::config::SyncSettings;
use gamecat_db::RebuildReport;

/// Which rows a sync visits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncMode {
    /// Every named row.
    #[default]
    Full,
    /// Only rows still missing the data the source provides.
    Partial,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    pub mode: SyncMode,
    /// Maximum number of rows sent to the source.
    pub limit: Option<usize>,
    /// Pause between consecutive rows.
    pub delay: Duration,
}

impl SyncOptions {
    /// Full mode, no limit, and the configured delay.
    pub fn from_settings(settings: &SyncSettings) -> Self {
        Self {
            mode: SyncMode::Full,
            limit: None,
            delay: Duration::from_secs(settings.request_delay_secs),
        }
    }

    pub fn with_mode(mut self, mode: SyncMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self::from_settings(&SyncSettings::default())
    }
}

/// Counters for one completed sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Rows sent to the source.
    pub processed: usize,
    /// Rows whose cells changed.
    pub updated: usize,
    /// Rows the source had no result for.
    pub not_found: usize,
    /// Rows skipped because the request failed.
    pub failed: usize,
    pub rebuild: RebuildReport,
}

/// How a sync ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Synced(SyncReport),
    /// No row was eligible; the sheet and database were left alone.
    NothingToSync,
}

/// Sleep between row `index` and the next one. No pause after the last row.
pub(crate) fn pause_between(index: usize, total: usize, delay: Duration) {
    if index + 1 < total && !delay.is_zero() {
        log::debug!("Waiting {}s before next request...", delay.as_secs_f32());
        std::thread::sleep(delay);
    }
}

/// Apply the row limit, logging when it trims anything.
pub(crate) fn apply_limit<T>(items: &mut Vec<T>, limit: Option<usize>) {
    let Some(limit) = limit else {
        return;
    };
    if items.len() > limit {
        log::info!("Limiting to {} of {} rows", limit, items.len());
        items.truncate(limit);
    }
}
