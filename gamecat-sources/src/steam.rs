//! Steam Web API: the owned-games list of one account.

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::SourceError;
use crate::http::{api_client, check_status};
use crate::source::OwnershipSource;

const BASE_URL: &str = "https://api.steampowered.com";
const OWNED_GAMES_PATH: &str = "/IPlayerService/GetOwnedGames/v0001/";

/// Platform name Steam games carry in the sheet.
pub const STEAM_PLATFORM: &str = "Steam";

/// One game owned on the account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedGame {
    pub app_id: u64,
    pub name: String,
    pub playtime_minutes: u64,
    /// Unix seconds of the last launch; `None` if never launched.
    pub last_played: Option<i64>,
}

/// The owned-games list as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnedLibrary {
    /// Count the API claims, which may exceed `games.len()`.
    pub declared_count: usize,
    pub games: Vec<OwnedGame>,
}

impl OwnedLibrary {
    /// The API regularly omits hidden or delisted titles from `games`.
    pub fn is_incomplete(&self) -> bool {
        self.games.len() < self.declared_count
    }

    /// The owned game named exactly `name`.
    pub fn find(&self, name: &str) -> Option<&OwnedGame> {
        self.games.iter().find(|g| g.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }
}

// ── Wire format ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct OwnedGamesResponse {
    #[serde(default)]
    response: OwnedGamesData,
}

#[derive(Debug, Default, Deserialize)]
struct OwnedGamesData {
    #[serde(default)]
    game_count: Option<usize>,
    #[serde(default)]
    games: Vec<RawOwnedGame>,
}

#[derive(Debug, Deserialize)]
struct RawOwnedGame {
    appid: u64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    playtime_forever: u64,
    #[serde(default)]
    rtime_last_played: Option<i64>,
}

impl From<RawOwnedGame> for OwnedGame {
    fn from(raw: RawOwnedGame) -> Self {
        Self {
            app_id: raw.appid,
            name: raw.name.trim().to_string(),
            playtime_minutes: raw.playtime_forever,
            last_played: raw.rtime_last_played.filter(|t| *t > 0),
        }
    }
}

/// Parse a GetOwnedGames response body.
///
/// A private profile answers with an empty `response` object, which parses
/// as an empty library.
pub fn parse_owned_games(body: &str) -> Result<OwnedLibrary, SourceError> {
    let parsed: OwnedGamesResponse = serde_json::from_str(body)?;
    let data = parsed.response;
    let games: Vec<OwnedGame> = data.games.into_iter().map(OwnedGame::from).collect();
    Ok(OwnedLibrary {
        declared_count: data.game_count.unwrap_or(games.len()),
        games,
    })
}

// ── Client ──────────────────────────────────────────────────────────────────

/// Blocking client for one Steam account.
pub struct SteamClient {
    http: Client,
    key: String,
    steam_id: String,
    base_url: String,
}

impl SteamClient {
    /// Fails with [`SourceError::MissingCredentials`] when either value is
    /// empty.
    pub fn new(key: &str, steam_id: &str) -> Result<Self, SourceError> {
        if key.trim().is_empty() {
            return Err(SourceError::MissingCredentials(
                "Steam API key is not set".to_string(),
            ));
        }
        if steam_id.trim().is_empty() {
            return Err(SourceError::MissingCredentials(
                "Steam account id is not set".to_string(),
            ));
        }
        Ok(Self {
            http: api_client()?,
            key: key.trim().to_string(),
            steam_id: steam_id.trim().to_string(),
            base_url: BASE_URL.to_string(),
        })
    }

    /// Point the client at another host (a local mirror or test server).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

impl OwnershipSource for SteamClient {
    fn platform_name(&self) -> &str {
        STEAM_PLATFORM
    }

    fn owned_games(&self) -> Result<OwnedLibrary, SourceError> {
        log::info!("Requesting owned games for SteamID {}", self.steam_id);
        let resp = self
            .http
            .get(format!("{}{OWNED_GAMES_PATH}", self.base_url))
            .query(&[
                ("key", self.key.as_str()),
                ("steamid", self.steam_id.as_str()),
                ("include_appinfo", "true"),
                ("format", "json"),
            ])
            .send()?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SourceError::InvalidCredentials(
                "Steam rejected the API key".to_string(),
            ));
        }
        let body = check_status("Steam", resp)?.text()?;
        let library = parse_owned_games(&body)?;

        if library.is_incomplete() {
            log::warn!(
                "Steam reports {} games but returned only {}; hidden or delisted games may be missing",
                library.declared_count,
                library.games.len()
            );
        }
        Ok(library)
    }
}
