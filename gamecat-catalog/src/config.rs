//! Catalog configuration: file locations, API tokens, controlled vocabulary,
//! and fuzzy-match thresholds.
//!
//! The configuration lives in `~/.config/gamecat/config.toml`. Every section
//! is optional; a missing file yields [`CatalogConfig::default`]. Once loaded
//! the value is immutable and passed by reference to every component that
//! needs it.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::similarity::SimilarityThresholds;

/// Vocabulary key of the status meaning "finished".
pub const STATUS_PASS: &str = "pass";
/// Vocabulary key of the status meaning "owned but never played".
pub const STATUS_NOT_STARTED: &str = "not_started";
/// Vocabulary key of the status meaning "played and abandoned".
pub const STATUS_ABANDONED: &str = "abandoned";
/// Vocabulary key of the placeholder platform that is never linked.
pub const PLATFORM_UNDEFINED: &str = "not_defined";
/// Vocabulary key of the platform fed by the ownership source.
pub const PLATFORM_STEAM: &str = "steam";

const STEAM_KEY_ENV: &str = "GAMECAT_STEAM_KEY";
const STEAM_ID_ENV: &str = "GAMECAT_STEAM_ID";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: io::Error,
    },
    #[error("TOML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

// ── Sections ────────────────────────────────────────────────────────────────

/// Full configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub paths: PathsConfig,
    pub tokens: TokensConfig,
    pub tables: DictionaryTables,
    pub sync: SyncSettings,
    pub similarity: SimilarityThresholds,
    pub statuses: Vec<VocabularyEntry>,
    pub platforms: Vec<VocabularyEntry>,
}

/// Where the spreadsheet, database, and SQL scripts live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// The CSV spreadsheet of record.
    pub sheet: PathBuf,
    /// The SQLite database rebuilt from the sheet.
    pub database: PathBuf,
    /// Drop/create/query scripts.
    pub sql_dir: PathBuf,
    /// Generated DML files, overwritten on every rebuild.
    pub work_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        let base = data_dir();
        Self {
            sheet: base.join("games.csv"),
            database: base.join("games.db"),
            sql_dir: base.join("sql"),
            work_dir: base.join("work"),
        }
    }
}

/// Ownership-source credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokensConfig {
    pub steam_key: Option<String>,
    pub steam_id: Option<String>,
}

impl TokensConfig {
    /// API key, with `GAMECAT_STEAM_KEY` taking precedence over the file.
    pub fn steam_key(&self) -> Option<String> {
        std::env::var(STEAM_KEY_ENV)
            .ok()
            .or_else(|| self.steam_key.clone())
            .filter(|k| !k.is_empty())
    }

    /// Account id, with `GAMECAT_STEAM_ID` taking precedence over the file.
    pub fn steam_id(&self) -> Option<String> {
        std::env::var(STEAM_ID_ENV)
            .ok()
            .or_else(|| self.steam_id.clone())
            .filter(|k| !k.is_empty())
    }
}

/// Names of the dictionary tables and their value columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryTables {
    pub status_table: String,
    pub status_column: String,
    pub platform_table: String,
    pub platform_column: String,
}

impl Default for DictionaryTables {
    fn default() -> Self {
        Self {
            status_table: "status_dictionary".to_string(),
            status_column: "status_name".to_string(),
            platform_table: "platform_dictionary".to_string(),
            platform_column: "platform_name".to_string(),
        }
    }
}

/// Pacing for the review-site and completion-time synchronizers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Blocking pause between consecutive external calls.
    pub request_delay_secs: u64,
    /// Row cap applied when a sync runs in test mode.
    pub test_mode_limit: usize,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            request_delay_secs: 10,
            test_mode_limit: 20,
        }
    }
}

/// One controlled-vocabulary value: a stable key and the text shown in the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub key: String,
    pub name: String,
}

impl VocabularyEntry {
    fn new(key: &str, name: &str) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
        }
    }
}

pub fn default_statuses() -> Vec<VocabularyEntry> {
    vec![
        VocabularyEntry::new(STATUS_PASS, "Completed"),
        VocabularyEntry::new(STATUS_NOT_STARTED, "Not Started"),
        VocabularyEntry::new(STATUS_ABANDONED, "Dropped"),
    ]
}

pub fn default_platforms() -> Vec<VocabularyEntry> {
    vec![
        VocabularyEntry::new(PLATFORM_UNDEFINED, "NOT DEFINED"),
        VocabularyEntry::new(PLATFORM_STEAM, "Steam"),
        VocabularyEntry::new("switch", "Switch"),
        VocabularyEntry::new("ps4", "PlayStation 4"),
        VocabularyEntry::new("ps_vita", "PlayStation Vita"),
        VocabularyEntry::new("pc_origin", "PC Origin"),
        VocabularyEntry::new("pc_gog", "PC GOG"),
        VocabularyEntry::new("ps5", "PlayStation 5"),
        VocabularyEntry::new("n3ds", "Nintendo 3DS"),
    ]
}

// ── Vocabulary lookups ──────────────────────────────────────────────────────

/// Status keys with fixed dictionary ids 1, 2 and 3. The bundled query
/// scripts refer to these ids directly.
pub const FIXED_STATUS_KEYS: [&str; 3] = [STATUS_PASS, STATUS_NOT_STARTED, STATUS_ABANDONED];

/// Id of a vocabulary entry is its 1-based position, matching the
/// autoincrement ids the dictionary tables receive when inserted in order.
fn position_id<'a>(
    mut entries: impl Iterator<Item = &'a VocabularyEntry>,
    name: &str,
) -> Option<u32> {
    entries.position(|e| e.name == name).map(|i| i as u32 + 1)
}

fn name_for_key<'a>(entries: &'a [VocabularyEntry], key: &str) -> Option<&'a str> {
    entries.iter().find(|e| e.key == key).map(|e| e.name.as_str())
}

impl CatalogConfig {
    /// Status display names in configured order.
    pub fn status_names(&self) -> Vec<&str> {
        self.statuses.iter().map(|e| e.name.as_str()).collect()
    }

    /// Platform display names in configured order.
    pub fn platform_names(&self) -> Vec<&str> {
        self.platforms.iter().map(|e| e.name.as_str()).collect()
    }

    /// Display name of the status with vocabulary key `key`.
    pub fn status_name(&self, key: &str) -> Option<&str> {
        name_for_key(&self.statuses, key)
    }

    /// Display name of the platform with vocabulary key `key`.
    pub fn platform_name(&self, key: &str) -> Option<&str> {
        name_for_key(&self.platforms, key)
    }

    /// Statuses in dictionary order: pass, not started and abandoned
    /// first, then any other status in configured order.
    pub fn dictionary_statuses(&self) -> Vec<&VocabularyEntry> {
        let fixed = FIXED_STATUS_KEYS
            .iter()
            .filter_map(|key| self.statuses.iter().find(|e| e.key == *key));
        let rest = self
            .statuses
            .iter()
            .filter(|e| !FIXED_STATUS_KEYS.contains(&e.key.as_str()));
        fixed.chain(rest).collect()
    }

    /// Dictionary id for a status display name, or 0 when unknown.
    pub fn status_id(&self, name: &str) -> u32 {
        position_id(self.dictionary_statuses().into_iter(), name).unwrap_or(0)
    }

    /// Dictionary id for a platform display name. Unknown names resolve to
    /// the undefined platform.
    pub fn platform_id(&self, name: &str) -> u32 {
        position_id(self.platforms.iter(), name).unwrap_or_else(|| self.undefined_platform_id())
    }

    /// Dictionary id of the placeholder platform that is never linked.
    pub fn undefined_platform_id(&self) -> u32 {
        self.platforms
            .iter()
            .position(|e| e.key == PLATFORM_UNDEFINED)
            .map(|i| i as u32 + 1)
            .unwrap_or(1)
    }

    /// Check the invariants the rest of the crate relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for key in [STATUS_PASS, STATUS_NOT_STARTED, STATUS_ABANDONED] {
            if self.status_name(key).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "missing status with key '{key}'"
                )));
            }
        }
        if self.platforms.is_empty() {
            return Err(ConfigError::Invalid("no platforms configured".to_string()));
        }
        if self.similarity.short_length_max > self.similarity.medium_length_max {
            return Err(ConfigError::Invalid(
                "similarity.short_length_max exceeds medium_length_max".to_string(),
            ));
        }
        Ok(())
    }

    /// Fill empty vocabulary lists with the built-in defaults.
    fn with_default_vocabulary(mut self) -> Self {
        if self.statuses.is_empty() {
            self.statuses = default_statuses();
        }
        if self.platforms.is_empty() {
            self.platforms = default_platforms();
        }
        self
    }

    /// Built-in configuration, including the default vocabulary.
    pub fn builtin() -> Self {
        Self::default().with_default_vocabulary()
    }
}

// ── File I/O ────────────────────────────────────────────────────────────────

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gamecat")
}

/// Canonical path to the config file: `~/.config/gamecat/config.toml`.
pub fn config_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("gamecat").join("config.toml")
}

/// Load the configuration at `path`, falling back to the built-in defaults
/// when the file does not exist.
pub fn load_config(path: &Path) -> Result<CatalogConfig, ConfigError> {
    if !path.exists() {
        log::debug!("No config at {}, using defaults", path.display());
        return Ok(CatalogConfig::builtin());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let config = parse_config(&contents).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration text. Absent sections take their defaults.
pub fn parse_config(contents: &str) -> Result<CatalogConfig, toml::de::Error> {
    let config: CatalogConfig = toml::from_str(contents)?;
    Ok(config.with_default_vocabulary())
}

/// Write `config` to `path` atomically, creating parent directories.
pub fn save_config(config: &CatalogConfig, path: &Path) -> Result<(), ConfigError> {
    let io_err = |e: io::Error| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let serialized = toml::to_string_pretty(config)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}
