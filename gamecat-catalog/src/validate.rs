//! Row validation against the configured vocabulary.
//!
//! Validation never mutates a row. It reports every distinct problem so the
//! caller can log them together and decide to skip the row.

use thiserror::Error;

use crate::config::CatalogConfig;
use crate::types::CatalogRow;

/// One reason a row cannot be imported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Game name is required")]
    MissingName,
    #[error("Status is required")]
    MissingStatus,
    #[error("Invalid status: {status}. Must be one of: {allowed}")]
    InvalidStatus { status: String, allowed: String },
    #[error("At least one platform is required")]
    MissingPlatform,
    #[error("Invalid platform: {0}")]
    InvalidPlatform(String),
    #[error("Invalid release date format: {0}. Expected: 'Month DD, YYYY'")]
    InvalidReleaseDate(String),
}

/// Validates rows against one configuration's vocabulary.
pub struct RowValidator<'a> {
    config: &'a CatalogConfig,
}

impl<'a> RowValidator<'a> {
    pub fn new(config: &'a CatalogConfig) -> Self {
        Self { config }
    }

    /// Check `row`, returning every distinct problem found.
    pub fn validate(&self, row: &CatalogRow) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut push = |e: ValidationError| {
            if !errors.contains(&e) {
                errors.push(e);
            }
        };

        if row.name.trim().is_empty() {
            push(ValidationError::MissingName);
        }

        let status = row.status.trim();
        if status.is_empty() {
            push(ValidationError::MissingStatus);
        } else if !self.config.status_names().contains(&status) {
            push(ValidationError::InvalidStatus {
                status: status.to_string(),
                allowed: self.config.status_names().join(", "),
            });
        }

        let platforms = self.config.platform_names();
        let mut any_platform = false;
        for token in row.platform_tokens() {
            any_platform = true;
            if !platforms.contains(&token) {
                push(ValidationError::InvalidPlatform(token.to_string()));
            }
        }
        if !any_platform {
            push(ValidationError::MissingPlatform);
        }

        let release = row.release_date.trim();
        if !release.is_empty() && !release.contains(',') {
            push(ValidationError::InvalidReleaseDate(release.to_string()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Join validation errors into a single log line.
pub fn describe_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
