use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamecat_catalog::{CatalogConfig, Sheet, load_config, save_config};
use gamecat_db::install_scripts;

use crate::CliError;

/// Write a default config, install the SQL scripts and create an empty sheet.
///
/// Existing scripts and an existing sheet are never overwritten.
pub(crate) fn run_init(path: &Path, force: bool) -> Result<(), CliError> {
    let config = if path.exists() && !force {
        log::info!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
        load_config(path)?
    } else {
        let config = CatalogConfig::builtin();
        save_config(&config, path)?;
        log::info!(
            "  {} Wrote config to {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            path.display()
        );
        config
    };

    let written = install_scripts(&config.paths.sql_dir)?;
    log::info!(
        "  {} Installed {} SQL script(s) into {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        written.len(),
        config.paths.sql_dir.display()
    );

    if !config.paths.sheet.exists() {
        Sheet::new().save(&config.paths.sheet)?;
        log::info!(
            "  {} Created empty sheet at {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            config.paths.sheet.display()
        );
    }
    Ok(())
}
