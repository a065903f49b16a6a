//! Spinner-backed progress display for the synchronizers.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use gamecat_sync::SyncProgress;

/// Shows the current phase and row on a single spinner line.
///
/// Log output goes through the spinner's `suspend` so lines do not tear.
pub(crate) struct SyncSpinner {
    pb: ProgressBar,
}

impl SyncSpinner {
    /// When `quiet` is true the spinner is hidden.
    pub(crate) fn new(quiet: bool) -> Self {
        let pb = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            let style = ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("/-\\|");
            pb.set_style(style);
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        };
        Self { pb }
    }
}

impl SyncProgress for SyncSpinner {
    fn on_phase(&self, message: &str) {
        self.pb.suspend(|| log::info!("{}", message));
        self.pb.set_message(message.to_string());
    }

    fn on_item(&self, current: usize, total: usize, name: &str) {
        self.pb.set_message(format!("[{}/{}] {}", current, total, name));
        log::debug!("  [{}/{}] {}", current, total, name);
    }

    fn on_complete(&self, message: &str) {
        self.pb.finish_and_clear();
        log::info!("{}", message);
    }
}

impl Drop for SyncSpinner {
    fn drop(&mut self) {
        self.pb.finish_and_clear();
    }
}
