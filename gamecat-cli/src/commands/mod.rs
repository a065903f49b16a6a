pub(crate) mod config;
pub(crate) mod init;
pub(crate) mod query;
pub(crate) mod rebuild;
pub(crate) mod steam;
pub(crate) mod sync;
pub(crate) mod validate;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamecat_db::RebuildReport;

/// Log the counts of a finished rebuild.
pub(crate) fn log_rebuild(report: &RebuildReport) {
    log::info!(
        "  {} {} games imported, {} rows skipped, {} platform links",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        report.imported,
        report.skipped,
        report.associations,
    );
}
