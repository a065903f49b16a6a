use gamecat_catalog::{ConfigError, SheetError};
use gamecat_db::{RebuildError, RepositoryError};
use gamecat_sources::SourceError;
use gamecat_sync::SyncError;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Sheet could not be read or written
    #[error("Sheet error: {0}")]
    Sheet(#[from] SheetError),

    /// Database rebuild failed
    #[error("Rebuild error: {0}")]
    Rebuild(#[from] RebuildError),

    /// Database query failed
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Source client could not be created
    #[error("{0}")]
    Source(#[from] SourceError),

    /// Synchronization failed
    #[error("Sync failed: {0}")]
    Sync(#[from] SyncError),

    /// Sheet rows failed validation
    #[error("{0} invalid row(s)")]
    Invalid(usize),

    /// Platform name not in the configured vocabulary
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),
}

impl CliError {
    pub(crate) fn unknown_platform(msg: impl Into<String>) -> Self {
        Self::UnknownPlatform(msg.into())
    }
}
