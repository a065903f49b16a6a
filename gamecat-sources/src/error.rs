/// Errors that can occur while talking to an external source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limited by {0}")]
    RateLimit(&'static str),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected response: {0}")]
    Parse(String),
}

impl SourceError {
    /// Whether this error will repeat for every remaining row, so the batch
    /// should stop instead of skipping one row.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials(_) | Self::MissingCredentials(_)
        )
    }
}
