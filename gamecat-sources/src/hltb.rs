//! HowLongToBeat: completion-time estimates by game name.

use reqwest::blocking::Client;
use reqwest::header::{ORIGIN, REFERER};
use serde::Deserialize;
use serde_json::json;

use crate::error::SourceError;
use crate::http::{browser_client, check_status};
use crate::source::CompletionTimeSource;

const SITE_URL: &str = "https://howlongtobeat.com";
const SEARCH_PATH: &str = "/api/search";
const RESULTS_PER_PAGE: u32 = 20;

/// Completion estimates for one game, in hours.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionTimes {
    pub game_id: u64,
    pub name: String,
    pub main_story: Option<f64>,
    pub main_extra: Option<f64>,
    pub completionist: Option<f64>,
    pub all_styles: Option<f64>,
    /// Name similarity to the query, 0.0 to 1.0.
    pub similarity: f64,
}

impl CompletionTimes {
    /// The first available estimate: main story, then main + extras, then
    /// completionist, then all styles.
    pub fn preferred_hours(&self) -> Option<f64> {
        [
            self.main_story,
            self.main_extra,
            self.completionist,
            self.all_styles,
        ]
        .into_iter()
        .flatten()
        .find(|h| *h > 0.0)
    }
}

// ── Wire format ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<SearchEntry>,
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    game_id: u64,
    game_name: String,
    #[serde(default)]
    comp_main: u64,
    #[serde(default)]
    comp_plus: u64,
    #[serde(default)]
    comp_100: u64,
    #[serde(default)]
    comp_all: u64,
}

/// Seconds to hours with one decimal. Zero means the site has no estimate.
fn seconds_to_hours(seconds: u64) -> Option<f64> {
    if seconds == 0 {
        return None;
    }
    Some((seconds as f64 / 3600.0 * 10.0).round() / 10.0)
}

fn similarity(query: &str, name: &str) -> f64 {
    strsim::normalized_levenshtein(&query.trim().to_lowercase(), &name.trim().to_lowercase())
}

/// Parse a search response and pick the entry whose name is closest to
/// `query`. Ties go to the entry listed first.
pub fn parse_search_response(body: &str, query: &str) -> Result<Option<CompletionTimes>, SourceError> {
    let parsed: SearchResponse = serde_json::from_str(body)?;
    let mut best: Option<CompletionTimes> = None;
    for entry in parsed.data {
        let candidate = CompletionTimes {
            similarity: similarity(query, &entry.game_name),
            game_id: entry.game_id,
            main_story: seconds_to_hours(entry.comp_main),
            main_extra: seconds_to_hours(entry.comp_plus),
            completionist: seconds_to_hours(entry.comp_100),
            all_styles: seconds_to_hours(entry.comp_all),
            name: entry.game_name,
        };
        if best
            .as_ref()
            .is_none_or(|b| candidate.similarity > b.similarity)
        {
            best = Some(candidate);
        }
    }
    Ok(best)
}

fn search_body(query: &str) -> serde_json::Value {
    let terms: Vec<&str> = query.split_whitespace().collect();
    json!({
        "searchType": "games",
        "searchTerms": terms,
        "searchPage": 1,
        "size": RESULTS_PER_PAGE,
        "searchOptions": {
            "games": {
                "userId": 0,
                "platform": "",
                "sortCategory": "popular",
                "rangeCategory": "main",
                "rangeTime": { "min": null, "max": null },
                "gameplay": { "perspective": "", "flow": "", "genre": "" },
                "rangeYear": { "min": "", "max": "" },
                "modifier": ""
            },
            "users": { "sortCategory": "postcount" },
            "lists": { "sortCategory": "follows" },
            "filter": "",
            "sort": 0,
            "randomizer": 0
        },
        "useCache": true
    })
}

// ── Client ──────────────────────────────────────────────────────────────────

/// Blocking HowLongToBeat client.
pub struct HltbClient {
    http: Client,
    base_url: String,
}

impl HltbClient {
    pub fn new() -> Result<Self, SourceError> {
        Ok(Self {
            http: browser_client()?,
            base_url: SITE_URL.to_string(),
        })
    }

    /// Point the client at another host.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

impl CompletionTimeSource for HltbClient {
    fn name(&self) -> &str {
        "HowLongToBeat"
    }

    fn search(&self, name: &str) -> Result<Option<CompletionTimes>, SourceError> {
        let resp = self
            .http
            .post(format!("{}{SEARCH_PATH}", self.base_url))
            .header(REFERER, format!("{}/", self.base_url))
            .header(ORIGIN, self.base_url.as_str())
            .json(&search_body(name))
            .send()?;
        let body = check_status("HowLongToBeat", resp)?.text()?;
        let best = parse_search_response(&body, name)?;
        match &best {
            Some(times) => log::debug!(
                "HowLongToBeat match for '{name}': '{}' (similarity {:.2})",
                times.name,
                times.similarity
            ),
            None => log::warn!("No HowLongToBeat results for '{name}'"),
        }
        Ok(best)
    }
}
