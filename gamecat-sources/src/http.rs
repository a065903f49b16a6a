//! Shared blocking HTTP plumbing for the page-scraping sources.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};

use crate::error::SourceError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Review and completion-time sites reject obvious bots, so requests look
/// like a desktop browser.
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// A client with browser-like default headers.
pub(crate) fn browser_client() -> Result<Client, SourceError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    let client = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(BROWSER_USER_AGENT)
        .default_headers(headers)
        .build()?;
    Ok(client)
}

/// A plain client for JSON APIs.
pub(crate) fn api_client() -> Result<Client, SourceError> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

/// Map non-success statuses to errors. `source` names the site in messages.
pub(crate) fn check_status(source: &'static str, resp: Response) -> Result<Response, SourceError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(SourceError::RateLimit(source));
    }
    let message: String = resp
        .text()
        .map(|t| t.chars().take(200).collect())
        .unwrap_or_default();
    Err(SourceError::ServerError {
        status: status.as_u16(),
        message: format!("{source}: {message}"),
    })
}
