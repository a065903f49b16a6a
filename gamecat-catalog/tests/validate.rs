use gamecat_catalog::{CatalogConfig, CatalogRow, RowValidator, ValidationError};

fn row(name: &str, platforms: &str, status: &str, release: &str) -> CatalogRow {
    CatalogRow {
        name: name.to_string(),
        platforms: platforms.to_string(),
        status: status.to_string(),
        release_date: release.to_string(),
        ..CatalogRow::default()
    }
}

#[test]
fn accepts_every_configured_status_and_platform() {
    let config = CatalogConfig::builtin();
    let validator = RowValidator::new(&config);

    for status in config.status_names() {
        for platform in config.platform_names() {
            let r = row("Alpha", platform, status, "May 2, 2024");
            assert_eq!(validator.validate(&r), Ok(()), "{status} / {platform}");
        }
    }
}

#[test]
fn rejects_unknown_status() {
    let config = CatalogConfig::builtin();
    let errors = RowValidator::new(&config)
        .validate(&row("Alpha", "Steam", "Beaten", "May 2, 2024"))
        .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].to_string(),
        "Invalid status: Beaten. Must be one of: Completed, Not Started, Dropped"
    );
}

#[test]
fn rejects_any_unknown_platform_token() {
    let config = CatalogConfig::builtin();
    let errors = RowValidator::new(&config)
        .validate(&row("Alpha", "Steam, Dreamcast", "Completed", ""))
        .unwrap_err();
    assert_eq!(errors, vec![ValidationError::InvalidPlatform("Dreamcast".to_string())]);
}

#[test]
fn reports_all_distinct_reasons() {
    let config = CatalogConfig::builtin();
    let errors = RowValidator::new(&config)
        .validate(&row("  ", "", "", "2024"))
        .unwrap_err();
    assert_eq!(
        errors,
        vec![
            ValidationError::MissingName,
            ValidationError::MissingStatus,
            ValidationError::MissingPlatform,
            ValidationError::InvalidReleaseDate("2024".to_string()),
        ]
    );
}

#[test]
fn duplicate_bad_tokens_are_reported_once() {
    let config = CatalogConfig::builtin();
    let errors = RowValidator::new(&config)
        .validate(&row("Alpha", "Amiga, Amiga", "Completed", ""))
        .unwrap_err();
    assert_eq!(errors.len(), 1);
}

#[test]
fn sentinel_release_date_is_valid() {
    let config = CatalogConfig::builtin();
    let r = row("Alpha", "Steam", "Not Started", gamecat_catalog::SHEET_DATE_NOT_SET);
    assert!(RowValidator::new(&config).validate(&r).is_ok());
}

#[test]
fn validation_does_not_mutate_the_row() {
    let config = CatalogConfig::builtin();
    let r = row("", " Steam ,Nope", "x", "bad");
    let before = r.clone();
    let _ = RowValidator::new(&config).validate(&r);
    assert_eq!(r, before);
}
