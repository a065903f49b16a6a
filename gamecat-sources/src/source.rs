//! The seams the synchronizers talk to. Each external site implements one
//! trait; tests substitute in-memory fakes.

use crate::error::SourceError;
use crate::hltb::CompletionTimes;
use crate::metacritic::ReviewRecord;
use crate::steam::OwnedLibrary;

/// A store account listing owned games with playtime.
pub trait OwnershipSource {
    /// Platform name (as it appears in the sheet) of the games this source owns.
    fn platform_name(&self) -> &str;

    /// Fetch the full owned-games list.
    fn owned_games(&self) -> Result<OwnedLibrary, SourceError>;
}

/// A review aggregator.
pub trait ReviewSource {
    /// Site name for logs and errors.
    fn name(&self) -> &str;

    /// Whether `url` already points at this site and can be fetched directly.
    fn is_review_url(&self, url: &str) -> bool;

    /// Search by game name, returning the first result's page URL.
    fn search_url(&self, name: &str) -> Result<Option<String>, SourceError>;

    /// Fetch and parse one game page. Fields missing from the page stay unset.
    fn fetch_review(&self, url: &str) -> Result<ReviewRecord, SourceError>;
}

/// A completion-time estimate site.
pub trait CompletionTimeSource {
    /// Site name for logs and errors.
    fn name(&self) -> &str;

    /// Best match for `name`, or `None` when the site has no result.
    fn search(&self, name: &str) -> Result<Option<CompletionTimes>, SourceError>;
}
