//! Metacritic: slug search and game-page parsing.
//!
//! Scores come from the page's JSON-LD block (`aggregateRating` for critics,
//! `userRating` for users). Older page layouts without JSON-LD are read from
//! their summary markup. Anything the page does not carry stays `None`.

use reqwest::blocking::Client;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::error::SourceError;
use crate::http::{browser_client, check_status};
use crate::source::ReviewSource;

pub const BASE_URL: &str = "https://www.metacritic.com";
const SITE_DOMAIN: &str = "metacritic.com";

/// Scores and metadata scraped from one game page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewRecord {
    /// Canonical page URL (after redirects).
    pub url: String,
    /// Release date as the page shows it (ISO or "Aug 7, 2020").
    pub release_date: Option<String>,
    /// Critic score on the 0-100 scale.
    pub critic_score: Option<f64>,
    /// User score as shown, never empty or "tbd".
    pub user_score: Option<String>,
}

impl ReviewRecord {
    pub fn has_scores(&self) -> bool {
        self.critic_score.is_some() || self.user_score.is_some()
    }
}

// ── URLs ────────────────────────────────────────────────────────────────────

/// Whether `url` points at Metacritic.
pub fn is_review_url(url: &str) -> bool {
    url.to_lowercase().contains(SITE_DOMAIN)
}

/// Search slug for a game name: lowercase, spaces to hyphens, other
/// punctuation dropped, hyphen runs collapsed.
pub fn search_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        let c = if c == ' ' { '-' } else { c };
        if c == '-' {
            if !slug.ends_with('-') {
                slug.push('-');
            }
        } else if c.is_alphanumeric() {
            slug.push(c);
        }
    }
    slug.trim_matches('-').to_string()
}

/// Search results page for `name`.
pub fn search_url(name: &str) -> String {
    format!("{BASE_URL}/search/game/{}/results", search_slug(name))
}

/// Absolute game-page URL for a link found on a search page, or `None`
/// when the link is not a game page.
fn game_page_url(href: &str) -> Option<String> {
    let path = match href.find(SITE_DOMAIN) {
        Some(i) => &href[i + SITE_DOMAIN.len()..],
        None if href.starts_with('/') => href,
        None => return None,
    };
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
    if parts.len() < 2 || parts[0] != "game" {
        return None;
    }
    if parts.iter().any(|p| *p == "search" || *p == "browse") {
        return None;
    }
    Some(format!("{BASE_URL}/{}/", parts.join("/")))
}

// ── Parsing ─────────────────────────────────────────────────────────────────

/// First game-page link on a search results page. Links inside result
/// containers win over other links on the page.
pub fn parse_search_results(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    for selector in [
        r#"li[class*="result"] a[href]"#,
        r#"[class*="result"] a[href]"#,
        "a[href]",
    ] {
        let Ok(sel) = Selector::parse(selector) else {
            continue;
        };
        let found = document
            .select(&sel)
            .filter_map(|link| link.value().attr("href"))
            .find_map(game_page_url);
        if found.is_some() {
            return found;
        }
    }
    None
}

/// Parse a game page fetched from `url`.
pub fn parse_game_page(html: &str, url: &str) -> ReviewRecord {
    let document = Html::parse_document(html);
    let mut record = ReviewRecord {
        url: url.to_string(),
        ..ReviewRecord::default()
    };

    for data in json_ld_blocks(&document) {
        if record.critic_score.is_none() {
            record.critic_score = data
                .pointer("/aggregateRating/ratingValue")
                .and_then(number_value);
        }
        if record.user_score.is_none() {
            record.user_score = data
                .pointer("/userRating/ratingValue")
                .and_then(text_value)
                .filter(|s| is_real_score(s));
        }
        if record.release_date.is_none() {
            record.release_date = data.get("datePublished").and_then(text_value);
        }
    }

    // Legacy layout
    if record.release_date.is_none() {
        record.release_date =
            select_first_text(&document, "li.summary_detail.release_data span.data");
    }
    if record.user_score.is_none() {
        record.user_score =
            select_first_text(&document, "div.details.side_details div.metascore_w")
                .filter(|s| is_real_score(s));
    }
    if record.critic_score.is_none() {
        record.critic_score = select_first_text(&document, r#"span[itemprop="ratingValue"]"#)
            .and_then(|s| s.parse().ok());
    }

    if !record.has_scores() {
        log::debug!("No scores found on {url}");
    }
    record
}

fn json_ld_blocks(document: &Html) -> Vec<Value> {
    let Ok(sel) = Selector::parse(r#"script[type="application/ld+json"]"#) else {
        return Vec::new();
    };
    let mut blocks = Vec::new();
    for script in document.select(&sel) {
        let text: String = script.text().collect();
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(items)) => blocks.extend(items),
            Ok(value) => blocks.push(value),
            Err(e) => log::debug!("Skipping malformed JSON-LD block: {e}"),
        }
    }
    blocks
}

fn number_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text_value(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if text.is_empty() { None } else { Some(text) }
}

fn is_real_score(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty() && !text.eq_ignore_ascii_case("tbd")
}

fn select_first_text(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    document
        .select(&sel)
        .next()
        .map(|n| n.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

// ── Client ──────────────────────────────────────────────────────────────────

/// Blocking Metacritic client.
pub struct MetacriticClient {
    http: Client,
}

impl MetacriticClient {
    pub fn new() -> Result<Self, SourceError> {
        Ok(Self {
            http: browser_client()?,
        })
    }
}

impl ReviewSource for MetacriticClient {
    fn name(&self) -> &str {
        "Metacritic"
    }

    fn is_review_url(&self, url: &str) -> bool {
        is_review_url(url)
    }

    fn search_url(&self, name: &str) -> Result<Option<String>, SourceError> {
        if search_slug(name).is_empty() {
            return Ok(None);
        }
        let url = search_url(name);
        log::debug!("Searching Metacritic: {url}");
        let resp = check_status("Metacritic", self.http.get(&url).send()?)?;
        let found = parse_search_results(&resp.text()?);
        match &found {
            Some(page) => log::info!("Found Metacritic URL for '{name}': {page}"),
            None => log::warn!("No Metacritic URL found for '{name}' (searched {url})"),
        }
        Ok(found)
    }

    fn fetch_review(&self, url: &str) -> Result<ReviewRecord, SourceError> {
        let resp = check_status("Metacritic", self.http.get(url).send()?)?;
        let final_url = resp.url().to_string();
        let body = resp.text()?;
        Ok(parse_game_page(&body, &final_url))
    }
}
