//! Read-only queries over the rebuilt catalog database.
//!
//! Query text is loaded from the SQL directory once, when the repository is
//! built, and never changes afterwards. A missing file is a construction
//! error. Every call opens its own read-only connection and closes it before
//! returning.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, Params, Row, params};
use thiserror::Error;

use crate::scripts;

const PLATFORMS_SQL: &str = "SELECT platform_name FROM platform_dictionary ORDER BY platform_name";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("SQL file not found: {}", .0.display())]
    SqlFileNotFound(PathBuf),
    #[error("Failed to read SQL file {}: {source}", .path.display())]
    SqlFileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to connect to database at {}: {source}", .path.display())]
    Connection {
        path: PathBuf,
        source: rusqlite::Error,
    },
    #[error("Failed to execute query ({sql}): {source}")]
    Query { sql: String, source: rusqlite::Error },
}

/// Full details of one game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameDetails {
    pub name: String,
    pub status: String,
    /// Comma-separated platform names.
    pub platforms: String,
    pub press_score: String,
    pub average_time_beat: String,
    pub user_score: String,
    pub my_score: String,
    pub metacritic_url: String,
    pub trailer_url: String,
    pub my_time_beat: String,
    pub last_launch_date: String,
    pub release_date: String,
    pub additional_time: String,
}

/// One entry of a "what to play next" list.
#[derive(Debug, Clone, PartialEq)]
pub struct GameListEntry {
    pub name: String,
    pub press_score: String,
    pub average_time_beat: String,
    pub trailer_url: String,
}

/// Which games count towards play-time totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpendTimeMode {
    Completed,
    All,
}

/// Expected (average) and real (personal plus additional) hours.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpendTime {
    pub expected: Option<f64>,
    pub real: Option<f64>,
}

/// Queries over one catalog database.
#[derive(Debug)]
pub struct CatalogQueryRepository {
    db_path: PathBuf,
    sql: HashMap<&'static str, String>,
}

const REQUIRED_QUERIES: [&str; 5] = [
    scripts::QUERY_GAME,
    scripts::NEXT_GAME_LIST,
    scripts::COUNT_COMPLETE_GAMES,
    scripts::COUNT_SPEND_TIME_COMPLETED,
    scripts::COUNT_SPEND_TIME,
];

impl CatalogQueryRepository {
    /// Load every query from `sql_dir`. Fails if any file is missing.
    pub fn new(db_path: &Path, sql_dir: &Path) -> Result<Self, RepositoryError> {
        let mut sql = HashMap::new();
        for name in REQUIRED_QUERIES {
            let path = sql_dir.join(name);
            if !path.is_file() {
                return Err(RepositoryError::SqlFileNotFound(path));
            }
            let text = std::fs::read_to_string(&path)
                .map_err(|e| RepositoryError::SqlFileRead { path, source: e })?;
            sql.insert(name, text);
        }
        log::debug!("Loaded {} query files from {}", sql.len(), sql_dir.display());
        Ok(Self {
            db_path: db_path.to_path_buf(),
            sql,
        })
    }

    /// Games whose name contains `term`.
    ///
    /// A leading `getgame` and a trailing `#` are stripped before searching.
    pub fn query_game(&self, term: &str) -> Result<Vec<GameDetails>, RepositoryError> {
        let pattern = format!("%{}%", clean_search_term(term));
        self.query(scripts::QUERY_GAME, params![pattern], row_to_details)
    }

    /// Not-started games on `platform`, best press score first.
    pub fn next_game_list(
        &self,
        offset: u32,
        limit: u32,
        platform: &str,
    ) -> Result<Vec<GameListEntry>, RepositoryError> {
        self.query(
            scripts::NEXT_GAME_LIST,
            params![platform, limit, offset],
            row_to_list_entry,
        )
    }

    /// Number of completed games on `platform`.
    pub fn count_complete_games(&self, platform: &str) -> Result<i64, RepositoryError> {
        let counts = self.query(scripts::COUNT_COMPLETE_GAMES, params![platform], |row| {
            row.get::<_, Option<i64>>(0)
        })?;
        Ok(counts.into_iter().next().flatten().unwrap_or(0))
    }

    /// Play-time totals on `platform`.
    pub fn count_spend_time(
        &self,
        platform: &str,
        mode: SpendTimeMode,
    ) -> Result<SpendTime, RepositoryError> {
        let name = match mode {
            SpendTimeMode::Completed => scripts::COUNT_SPEND_TIME_COMPLETED,
            SpendTimeMode::All => scripts::COUNT_SPEND_TIME,
        };
        let rows = self.query(name, params![platform], |row| {
            Ok(SpendTime {
                expected: row.get(0)?,
                real: row.get(1)?,
            })
        })?;
        Ok(rows.into_iter().next().unwrap_or_default())
    }

    /// Every platform name, alphabetically.
    pub fn platforms(&self) -> Result<Vec<String>, RepositoryError> {
        let conn = self.connect()?;
        let rows = run_query(&conn, PLATFORMS_SQL, [], |row| {
            row.get::<_, Option<String>>(0)
        })?;
        Ok(rows
            .into_iter()
            .flatten()
            .filter(|name| !name.is_empty())
            .collect())
    }

    fn connect(&self) -> Result<Connection, RepositoryError> {
        Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| {
            log::error!("Failed to connect to database {}: {e}", self.db_path.display());
            RepositoryError::Connection {
                path: self.db_path.clone(),
                source: e,
            }
        })
    }

    fn query<T, P, F>(&self, name: &str, params: P, map: F) -> Result<Vec<T>, RepositoryError>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        // Every name passed here is one of REQUIRED_QUERIES, loaded in `new`.
        let sql = self.sql.get(name).map(String::as_str).unwrap_or_default();
        let conn = self.connect()?;
        run_query(&conn, sql, params, map)
    }
}

fn run_query<T, P, F>(conn: &Connection, sql: &str, params: P, map: F) -> Result<Vec<T>, RepositoryError>
where
    P: Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let query_err = |e: rusqlite::Error| {
        let snippet: String = sql.chars().take(100).collect();
        log::error!("SQLite error executing query: {snippet}: {e}");
        RepositoryError::Query {
            sql: snippet,
            source: e,
        }
    };
    let mut stmt = conn.prepare(sql).map_err(query_err)?;
    let rows = stmt.query_map(params, map).map_err(query_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(query_err)
}

/// Strip the chat-command decorations from a search term.
pub fn clean_search_term(term: &str) -> String {
    let term = term.strip_suffix('#').unwrap_or(term);
    term.replacen("getgame", "", 1).trim().to_string()
}

/// Render a stored value the way the sheet shows it.
fn value_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s,
        Value::Blob(_) => String::new(),
    }
}

fn text_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    row.get::<_, Value>(idx).map(value_text)
}

fn row_to_details(row: &Row<'_>) -> rusqlite::Result<GameDetails> {
    Ok(GameDetails {
        name: text_at(row, 0)?,
        status: text_at(row, 1)?,
        platforms: text_at(row, 2)?,
        press_score: text_at(row, 3)?,
        average_time_beat: text_at(row, 4)?,
        user_score: text_at(row, 5)?,
        my_score: text_at(row, 6)?,
        metacritic_url: text_at(row, 7)?,
        trailer_url: text_at(row, 8)?,
        my_time_beat: text_at(row, 9)?,
        last_launch_date: text_at(row, 10)?,
        release_date: text_at(row, 11)?,
        additional_time: text_at(row, 12)?,
    })
}

fn row_to_list_entry(row: &Row<'_>) -> rusqlite::Result<GameListEntry> {
    Ok(GameListEntry {
        name: text_at(row, 0)?,
        press_score: text_at(row, 1)?,
        average_time_beat: text_at(row, 2)?,
        trailer_url: text_at(row, 3)?,
    })
}
