use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamecat_catalog::validate::describe_errors;
use gamecat_catalog::{CatalogConfig, RowValidator, Sheet};

use crate::CliError;

/// Check every sheet row and list the ones a rebuild would skip.
pub(crate) fn run_validate(config: &CatalogConfig) -> Result<(), CliError> {
    let sheet = Sheet::load(&config.paths.sheet)?;
    let validator = RowValidator::new(config);

    let mut checked = 0;
    let mut invalid = 0;
    for (row_number, row) in sheet.read_rows() {
        checked += 1;
        if let Err(errors) = validator.validate(row) {
            invalid += 1;
            log::warn!(
                "  {} Row {} ('{}'): {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                row_number,
                row.name,
                describe_errors(&errors),
            );
        }
    }

    if invalid > 0 {
        return Err(CliError::Invalid(invalid));
    }
    log::info!(
        "  {} All {} rows are valid",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        checked
    );
    Ok(())
}
