//! Data model types for the catalog spreadsheet.
//!
//! A [`CatalogRow`] is one game as held in the spreadsheet of record. Unset
//! fields are never empty strings once a row has been written by this crate:
//! they carry one of the sentinel literals below, which existing sheets and
//! databases already contain and which every reader relies on.

use serde::{Deserialize, Serialize};

// ── Sentinels ───────────────────────────────────────────────────────────────

/// Literal stored in numeric and text cells that are intentionally unset.
pub const NONE_VALUE: &str = "none";

/// Literal stored in spreadsheet date cells that are intentionally unset.
pub const SHEET_DATE_NOT_SET: &str = "December 12, 4712";

/// Literal stored in database date columns that are intentionally unset.
pub const DB_DATE_NOT_SET: &str = "4712-12-12";

// ── Layout ──────────────────────────────────────────────────────────────────

/// Number of columns in the spreadsheet of record.
pub const COLUMN_COUNT: usize = 13;

/// Header row written to new spreadsheets, in column order.
pub const HEADER: [&str; COLUMN_COUNT] = [
    "Game Name",
    "Platform",
    "Status",
    "Release Date",
    "Press Score",
    "User Score",
    "My Score",
    "Metacritic URL",
    "Average Time",
    "Trailer URL",
    "My Time",
    "Last Launch",
    "Additional Time",
];

// ── CatalogRow ──────────────────────────────────────────────────────────────

/// One game as held in the spreadsheet of record.
///
/// Every field keeps the cell text verbatim; the only conversion happens at
/// the read boundary ([`CatalogRow::from_cells`]) and the write boundary
/// ([`CatalogRow::to_cells`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    /// Unique key within the sheet.
    pub name: String,
    /// Comma-separated platform display names.
    pub platforms: String,
    pub status: String,
    /// "Month D, YYYY" or [`SHEET_DATE_NOT_SET`].
    pub release_date: String,
    pub press_score: String,
    pub user_score: String,
    pub my_score: String,
    pub metacritic_url: String,
    /// Hours, as reported by the completion-time source.
    pub average_time_beat: String,
    pub trailer_url: String,
    /// Hours played, as reported by the ownership source.
    pub my_time_beat: String,
    pub last_launch_date: String,
    /// Hours played outside the ownership source.
    pub additional_time: String,
}

impl CatalogRow {
    /// Build a row from positional cells. Missing trailing cells are empty,
    /// extra cells are ignored. Cell text is kept verbatim.
    pub fn from_cells<S: AsRef<str>>(cells: &[S]) -> Self {
        let cell = |i: usize| {
            cells
                .get(i)
                .map(|c| c.as_ref().to_string())
                .unwrap_or_default()
        };
        Self {
            name: cell(0),
            platforms: cell(1),
            status: cell(2),
            release_date: cell(3),
            press_score: cell(4),
            user_score: cell(5),
            my_score: cell(6),
            metacritic_url: cell(7),
            average_time_beat: cell(8),
            trailer_url: cell(9),
            my_time_beat: cell(10),
            last_launch_date: cell(11),
            additional_time: cell(12),
        }
    }

    /// Cells in column order.
    pub fn to_cells(&self) -> [&str; COLUMN_COUNT] {
        [
            &self.name,
            &self.platforms,
            &self.status,
            &self.release_date,
            &self.press_score,
            &self.user_score,
            &self.my_score,
            &self.metacritic_url,
            &self.average_time_beat,
            &self.trailer_url,
            &self.my_time_beat,
            &self.last_launch_date,
            &self.additional_time,
        ]
    }

    /// True when every cell is empty. Such rows are not data.
    pub fn is_blank(&self) -> bool {
        self.to_cells().iter().all(|c| c.is_empty())
    }

    /// Platform tokens, trimmed, with empty tokens dropped.
    pub fn platform_tokens(&self) -> impl Iterator<Item = &str> {
        self.platforms
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Whether the platform list names `platform` (case-insensitive).
    pub fn is_on_platform(&self, platform: &str) -> bool {
        self.platform_tokens()
            .any(|t| t.eq_ignore_ascii_case(platform))
    }

    /// A freshly discovered game with every optional field unset.
    pub fn new_entry(name: &str, platform: &str, status: &str) -> Self {
        Self {
            name: name.to_string(),
            platforms: platform.to_string(),
            status: status.to_string(),
            release_date: SHEET_DATE_NOT_SET.to_string(),
            press_score: NONE_VALUE.to_string(),
            user_score: NONE_VALUE.to_string(),
            my_score: NONE_VALUE.to_string(),
            metacritic_url: NONE_VALUE.to_string(),
            average_time_beat: NONE_VALUE.to_string(),
            trailer_url: NONE_VALUE.to_string(),
            my_time_beat: NONE_VALUE.to_string(),
            last_launch_date: SHEET_DATE_NOT_SET.to_string(),
            additional_time: NONE_VALUE.to_string(),
        }
    }
}

/// True when a cell holds no usable value: empty or the [`NONE_VALUE`] sentinel.
pub fn is_unset(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || cell == NONE_VALUE
}
