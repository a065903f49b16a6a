//! Sync progress reporting.

/// Receives progress updates while a synchronizer runs.
pub trait SyncProgress {
    /// Called when a phase starts (e.g., "Fetching owned games from Steam").
    fn on_phase(&self, message: &str);

    /// Called before each row is sent to the external source.
    fn on_item(&self, current: usize, total: usize, name: &str);

    /// Called when the sync is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl SyncProgress for SilentProgress {
    fn on_phase(&self, _message: &str) {}
    fn on_item(&self, _current: usize, _total: usize, _name: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl SyncProgress for LogProgress {
    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_item(&self, current: usize, total: usize, name: &str) {
        log::info!("  [{}/{}] {}", current, total, name);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
