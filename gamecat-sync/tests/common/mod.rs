#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use gamecat_catalog::{CatalogConfig, CatalogRow, Sheet};
use gamecat_db::install_scripts;
use gamecat_sources::{
    CompletionTimeSource, CompletionTimes, OwnedGame, OwnedLibrary, OwnershipSource, ReviewRecord,
    ReviewSource, SourceError,
};
use gamecat_sync::SyncOptions;

pub fn config_in(dir: &Path) -> CatalogConfig {
    let mut config = CatalogConfig::builtin();
    config.paths.sheet = dir.join("games.csv");
    config.paths.database = dir.join("games.db");
    config.paths.sql_dir = dir.join("sql");
    config.paths.work_dir = dir.join("work");
    install_scripts(&config.paths.sql_dir).unwrap();
    config
}

pub fn write_sheet(path: &Path, rows: Vec<CatalogRow>) {
    let mut sheet = Sheet::new();
    for (i, row) in rows.into_iter().enumerate() {
        sheet.write_row(i + 2, row).unwrap();
    }
    sheet.save(path).unwrap();
}

pub fn load_row(path: &Path, name: &str) -> CatalogRow {
    let sheet = Sheet::load(path).unwrap();
    let n = sheet.find_row_by_name(name).unwrap();
    sheet.row(n).unwrap().clone()
}

pub fn game(name: &str, platforms: &str, status: &str) -> CatalogRow {
    CatalogRow::new_entry(name, platforms, status)
}

pub fn no_delay() -> SyncOptions {
    SyncOptions::default().with_delay(Duration::ZERO)
}

// ── Fake sources ────────────────────────────────────────────────────────────

pub struct FakeLibrary {
    pub result: RefCell<Option<Result<OwnedLibrary, SourceError>>>,
    pub calls: Rc<Cell<usize>>,
}

impl FakeLibrary {
    pub fn owning(games: Vec<OwnedGame>) -> Self {
        let library = OwnedLibrary {
            declared_count: games.len(),
            games,
        };
        Self {
            result: RefCell::new(Some(Ok(library))),
            calls: Rc::new(Cell::new(0)),
        }
    }

    pub fn failing(error: SourceError) -> Self {
        Self {
            result: RefCell::new(Some(Err(error))),
            calls: Rc::new(Cell::new(0)),
        }
    }
}

impl OwnershipSource for FakeLibrary {
    fn platform_name(&self) -> &str {
        "Steam"
    }

    fn owned_games(&self) -> Result<OwnedLibrary, SourceError> {
        self.calls.set(self.calls.get() + 1);
        match self.result.borrow_mut().take() {
            Some(result) => result,
            None => Err(SourceError::Parse("library already fetched".to_string())),
        }
    }
}

pub fn owned(name: &str, playtime_minutes: u64, last_played: Option<i64>) -> OwnedGame {
    OwnedGame {
        app_id: 0,
        name: name.to_string(),
        playtime_minutes,
        last_played,
    }
}

/// Review site keyed by game name. Names mapped to an error string fail with
/// a server error; "reject" fails with invalid credentials.
pub struct FakeReviews {
    pub pages: HashMap<String, ReviewRecord>,
    pub failing: Vec<String>,
    pub calls: Rc<Cell<usize>>,
    pub searched: Rc<RefCell<Vec<String>>>,
}

impl FakeReviews {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            failing: Vec::new(),
            calls: Rc::new(Cell::new(0)),
            searched: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn with_page(mut self, name: &str, critic: f64, user: &str) -> Self {
        let url = page_url(name);
        self.pages.insert(
            url.clone(),
            ReviewRecord {
                url,
                release_date: Some("2020-09-17".to_string()),
                critic_score: Some(critic),
                user_score: Some(user.to_string()),
            },
        );
        self
    }

    /// A page that exists but carries no scores and no date.
    pub fn with_empty_page(mut self, name: &str) -> Self {
        let url = page_url(name);
        self.pages.insert(
            url.clone(),
            ReviewRecord {
                url,
                release_date: None,
                critic_score: None,
                user_score: None,
            },
        );
        self
    }

    pub fn with_failure(mut self, name: &str) -> Self {
        self.failing.push(name.to_string());
        self
    }
}

pub fn page_url(name: &str) -> String {
    format!(
        "https://www.metacritic.com/game/{}/",
        name.to_lowercase().replace(' ', "-")
    )
}

impl ReviewSource for FakeReviews {
    fn name(&self) -> &str {
        "Metacritic"
    }

    fn is_review_url(&self, url: &str) -> bool {
        url.contains("metacritic.com")
    }

    fn search_url(&self, name: &str) -> Result<Option<String>, SourceError> {
        self.calls.set(self.calls.get() + 1);
        self.searched.borrow_mut().push(name.to_string());
        if name == "reject" {
            return Err(SourceError::InvalidCredentials("forbidden".to_string()));
        }
        if self.failing.iter().any(|f| f == name) {
            return Err(SourceError::ServerError {
                status: 500,
                message: "boom".to_string(),
            });
        }
        let url = page_url(name);
        Ok(self.pages.contains_key(&url).then_some(url))
    }

    fn fetch_review(&self, url: &str) -> Result<ReviewRecord, SourceError> {
        self.calls.set(self.calls.get() + 1);
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| SourceError::Parse(format!("no page at {url}")))
    }
}

/// Completion-time site keyed by game name.
pub struct FakeTimes {
    pub times: HashMap<String, f64>,
    pub failing: Vec<String>,
    pub calls: Rc<Cell<usize>>,
}

impl FakeTimes {
    pub fn new() -> Self {
        Self {
            times: HashMap::new(),
            failing: Vec::new(),
            calls: Rc::new(Cell::new(0)),
        }
    }

    pub fn with_time(mut self, name: &str, hours: f64) -> Self {
        self.times.insert(name.to_string(), hours);
        self
    }

    pub fn with_failure(mut self, name: &str) -> Self {
        self.failing.push(name.to_string());
        self
    }
}

impl CompletionTimeSource for FakeTimes {
    fn name(&self) -> &str {
        "HowLongToBeat"
    }

    fn search(&self, name: &str) -> Result<Option<CompletionTimes>, SourceError> {
        self.calls.set(self.calls.get() + 1);
        if name == "reject" {
            return Err(SourceError::MissingCredentials("no session".to_string()));
        }
        if self.failing.iter().any(|f| f == name) {
            return Err(SourceError::RateLimit("HowLongToBeat"));
        }
        Ok(self.times.get(name).map(|hours| CompletionTimes {
            game_id: 1,
            name: name.to_string(),
            main_story: Some(*hours),
            main_extra: None,
            completionist: None,
            all_styles: None,
            similarity: 1.0,
        }))
    }
}
