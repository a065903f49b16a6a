use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamecat_catalog::CatalogConfig;
use gamecat_db::CatalogRebuilder;

use crate::CliError;

/// Rebuild the database from the sheet.
pub(crate) fn run_rebuild(config: &CatalogConfig) -> Result<(), CliError> {
    log::info!(
        "{}",
        format!(
            "Rebuilding {} from {}",
            config.paths.database.display(),
            config.paths.sheet.display()
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );
    let report = CatalogRebuilder::new(config)?.rebuild_configured()?;
    super::log_rebuild(&report);
    Ok(())
}
