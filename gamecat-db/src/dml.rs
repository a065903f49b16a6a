//! Projection of validated sheet rows into relational rows, and rendering of
//! those rows as insert scripts.

use gamecat_catalog::dates::sheet_date_to_iso;
use gamecat_catalog::validate::{RowValidator, ValidationError};
use gamecat_catalog::{CatalogConfig, CatalogRow, DB_DATE_NOT_SET, NONE_VALUE, Sheet};
use uuid::Uuid;

// ── Relational rows ─────────────────────────────────────────────────────────

/// A cell value as it is written into the games table.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric cells become numbers; anything else (including the sentinel)
    /// stays text. Empty cells become the sentinel.
    pub fn numeric(cell: &str) -> Self {
        let cell = cell.trim();
        match cell.parse::<f64>() {
            Ok(n) if n.is_finite() => Self::Number(n),
            _ => Self::text(cell),
        }
    }

    /// Text cells, with empty cells replaced by the sentinel.
    pub fn text(cell: &str) -> Self {
        let cell = cell.trim();
        if cell.is_empty() {
            Self::Text(NONE_VALUE.to_string())
        } else {
            Self::Text(cell.to_string())
        }
    }

    fn to_sql(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => quote(s),
        }
    }
}

/// The relational projection of one valid [`CatalogRow`].
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogGame {
    /// Fresh per rebuild; never stable across rebuilds.
    pub game_id: String,
    pub name: String,
    /// Dictionary id, or 0 for a status outside the vocabulary.
    pub status_id: u32,
    /// ISO date or [`DB_DATE_NOT_SET`].
    pub release_date: String,
    pub press_score: FieldValue,
    pub user_score: FieldValue,
    pub my_score: FieldValue,
    pub metacritic_url: FieldValue,
    pub average_time_beat: FieldValue,
    pub trailer_url: FieldValue,
    pub my_time_beat: FieldValue,
    pub last_launch_date: String,
    pub additional_time: FieldValue,
}

/// One edge of the games/platforms many-to-many relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformAssociation {
    pub platform_id: u32,
    pub game_id: String,
}

/// A sheet row left out of the import, with the reasons.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    pub row_number: usize,
    pub name: String,
    pub errors: Vec<ValidationError>,
}

/// Everything a rebuild will insert, plus the rows it will not.
#[derive(Debug, Clone, Default)]
pub struct ImportPlan {
    pub games: Vec<CatalogGame>,
    pub associations: Vec<PlatformAssociation>,
    pub skipped: Vec<SkippedRow>,
}

// ── Planning ────────────────────────────────────────────────────────────────

/// Validate every row of `sheet` and project the valid ones, in sheet order.
pub fn plan_import(sheet: &Sheet, config: &CatalogConfig) -> ImportPlan {
    let validator = RowValidator::new(config);
    let undefined = config.undefined_platform_id();
    let mut plan = ImportPlan::default();

    for (row_number, row) in sheet.read_rows() {
        if let Err(errors) = validator.validate(row) {
            plan.skipped.push(SkippedRow {
                row_number,
                name: row.name.clone(),
                errors,
            });
            continue;
        }

        let game = project_row(row, config, Uuid::new_v4().to_string());
        for token in row.platform_tokens() {
            let platform_id = config.platform_id(token);
            if platform_id == undefined {
                continue;
            }
            plan.associations.push(PlatformAssociation {
                platform_id,
                game_id: game.game_id.clone(),
            });
        }
        plan.games.push(game);
    }

    plan
}

/// Project one row. The row is assumed to be valid.
pub fn project_row(row: &CatalogRow, config: &CatalogConfig, game_id: String) -> CatalogGame {
    let status_id = config.status_id(row.status.trim());
    if status_id == 0 {
        log::warn!("Unknown status '{}' for '{}', using id 0", row.status, row.name);
    }

    CatalogGame {
        game_id,
        name: row.name.trim().to_string(),
        status_id,
        release_date: store_date(&row.release_date, &row.name),
        press_score: FieldValue::numeric(&row.press_score),
        user_score: FieldValue::numeric(&row.user_score),
        my_score: FieldValue::numeric(&row.my_score),
        metacritic_url: FieldValue::text(&row.metacritic_url),
        average_time_beat: FieldValue::numeric(&row.average_time_beat),
        trailer_url: FieldValue::text(&row.trailer_url),
        my_time_beat: FieldValue::numeric(&row.my_time_beat),
        last_launch_date: store_date(&row.last_launch_date, &row.name),
        additional_time: FieldValue::numeric(&row.additional_time),
    }
}

fn store_date(cell: &str, game: &str) -> String {
    let cell = cell.trim();
    if cell.is_empty() || cell == NONE_VALUE {
        return DB_DATE_NOT_SET.to_string();
    }
    sheet_date_to_iso(cell).unwrap_or_else(|| {
        log::warn!("Unparseable date '{cell}' for '{game}', storing as not set");
        DB_DATE_NOT_SET.to_string()
    })
}

// ── Rendering ───────────────────────────────────────────────────────────────

/// Quote `s` as an SQL string literal.
pub fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

const GAMES_COLUMNS: &str = "game_id, game_name, status, release_date, press_score, \
    user_score, my_score, metacritic_url, average_time_beat, trailer_url, my_time_beat, \
    last_launch_date, additional_time";

/// Insert script for the games table. An empty list renders a comment only.
pub fn render_games(games: &[CatalogGame]) -> String {
    if games.is_empty() {
        return "-- no games to import\n".to_string();
    }
    let rows: Vec<String> = games
        .iter()
        .map(|g| {
            format!(
                "   ({}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {})",
                quote(&g.game_id),
                quote(&g.name),
                g.status_id,
                quote(&g.release_date),
                g.press_score.to_sql(),
                g.user_score.to_sql(),
                g.my_score.to_sql(),
                g.metacritic_url.to_sql(),
                g.average_time_beat.to_sql(),
                g.trailer_url.to_sql(),
                g.my_time_beat.to_sql(),
                quote(&g.last_launch_date),
                g.additional_time.to_sql(),
            )
        })
        .collect();
    format!(
        "INSERT INTO games ({GAMES_COLUMNS})\nVALUES\n{};\n",
        rows.join(",\n")
    )
}

/// Insert script for the join table. An empty list renders a comment only.
pub fn render_associations(associations: &[PlatformAssociation]) -> String {
    if associations.is_empty() {
        return "-- no platform associations to import\n".to_string();
    }
    let rows: Vec<String> = associations
        .iter()
        .map(|a| format!("   ({}, {})", a.platform_id, quote(&a.game_id)))
        .collect();
    format!(
        "INSERT INTO games_on_platforms (platform_id, reference_game_id)\nVALUES\n{};\n",
        rows.join(",\n")
    )
}
