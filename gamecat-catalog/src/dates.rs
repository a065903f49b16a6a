//! Conversions between the date and duration formats used by the sheet, the
//! database, and the external sources.

use chrono::{DateTime, Local, NaiveDate, TimeZone};

use crate::types::{DB_DATE_NOT_SET, SHEET_DATE_NOT_SET};

const SHEET_FORMAT: &str = "%B %d, %Y";
const ISO_FORMAT: &str = "%Y-%m-%d";

/// Parse a sheet date ("May 2, 2024" or "May 02, 2024").
pub fn parse_sheet_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), SHEET_FORMAT).ok()
}

/// Convert a sheet date to the database form.
///
/// The sheet's not-set sentinel maps to the database's not-set sentinel.
/// Returns `None` when the text is not a recognizable date.
pub fn sheet_date_to_iso(text: &str) -> Option<String> {
    let text = text.trim();
    if text == SHEET_DATE_NOT_SET {
        return Some(DB_DATE_NOT_SET.to_string());
    }
    parse_sheet_date(text).map(|d| d.format(ISO_FORMAT).to_string())
}

/// Format a date the way the sheet stores it ("May 02, 2024").
pub fn format_sheet_date(date: NaiveDate) -> String {
    date.format(SHEET_FORMAT).to_string()
}

/// Convert Unix epoch seconds to a sheet date in local time.
pub fn epoch_to_sheet_date(epoch: i64) -> Option<String> {
    let utc = DateTime::from_timestamp(epoch, 0)?;
    let local = Local.from_utc_datetime(&utc.naive_utc());
    Some(format_sheet_date(local.date_naive()))
}

/// Expand an abbreviated month ("Aug 7, 2020") to the sheet form
/// ("August 7, 2020"). Text that does not start with a known abbreviation is
/// returned trimmed but otherwise unchanged.
pub fn expand_month_abbreviation(text: &str) -> String {
    const MONTHS: [(&str, &str); 12] = [
        ("Jan", "January"),
        ("Feb", "February"),
        ("Mar", "March"),
        ("Apr", "April"),
        ("May", "May"),
        ("Jun", "June"),
        ("Jul", "July"),
        ("Aug", "August"),
        ("Sep", "September"),
        ("Oct", "October"),
        ("Nov", "November"),
        ("Dec", "December"),
    ];

    let text = text.trim();
    let (head, rest) = match text.split_once(' ') {
        Some(parts) => parts,
        None => return text.to_string(),
    };
    let head = head.trim_end_matches('.');
    for (abbr, full) in MONTHS {
        if head.eq_ignore_ascii_case(abbr) || head.eq_ignore_ascii_case(full) {
            return format!("{full} {}", rest.trim());
        }
    }
    text.to_string()
}

/// Normalize a date reported by the review site.
///
/// Accepts ISO dates ("2020-08-07") as well as abbreviated or full month
/// names, and always returns the sheet form.
pub fn review_date_to_sheet(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, ISO_FORMAT) {
        return Some(format!(
            "{} {}, {}",
            date.format("%B"),
            date.format("%-d"),
            date.format("%Y")
        ));
    }
    let expanded = expand_month_abbreviation(text);
    parse_sheet_date(&expanded).map(|_| expanded)
}

/// Hours with two decimals, as written for personal play time.
pub fn minutes_to_hours(minutes: u64) -> f64 {
    (minutes as f64 / 60.0 * 100.0).round() / 100.0
}

/// "X hours Y minutes" for a duration in fractional hours.
pub fn format_hours(hours: f64) -> String {
    let total_minutes = (hours.max(0.0) * 60.0).round() as u64;
    format!("{} hours {} minutes", total_minutes / 60, total_minutes % 60)
}

/// Hours as written into a sheet cell, always with a decimal part
/// ("2.0", "12.57").
pub fn hours_cell(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{hours:.1}")
    } else {
        hours.to_string()
    }
}
