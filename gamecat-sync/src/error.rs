use gamecat_catalog::SheetError;
use gamecat_db::RebuildError;
use gamecat_sources::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Sheet(#[from] SheetError),
    #[error(transparent)]
    Rebuild(#[from] RebuildError),
    #[error("{site} request failed: {source}")]
    Source { site: String, source: SourceError },
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SyncError {
    pub(crate) fn from_source(site: &str, source: SourceError) -> Self {
        Self::Source {
            site: site.to_string(),
            source,
        }
    }
}
