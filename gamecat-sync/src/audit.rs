//! Human-facing reconciliation reports.

use gamecat_catalog::{Sheet, SimilarityMatch, SimilarityThresholds, find_closest_match};

/// Closest sheet name for every name the source has but the sheet lacks.
///
/// Matches are diagnostics only; nothing here touches the sheet.
pub fn find_similar_games(
    missing: &[String],
    sheet: &Sheet,
    thresholds: &SimilarityThresholds,
) -> Vec<SimilarityMatch> {
    if missing.is_empty() {
        return Vec::new();
    }
    let names = sheet.names();
    missing
        .iter()
        .map(|name| find_closest_match(name, &names, thresholds))
        .collect()
}

/// Report listing unmatched names with their nearest sheet entry.
///
/// Returns an empty string when there is nothing to report.
pub fn format_missing_games(source: &str, matches: &[SimilarityMatch]) -> String {
    if matches.is_empty() {
        return String::new();
    }
    let mut lines = vec![format!("Games from {source} not found in database:")];
    let mut any_match = false;
    for m in matches {
        lines.push(format!("\n• original: {}", m.original));
        match &m.closest_match {
            Some(closest) => {
                any_match = true;
                lines.push(format!(
                    "  closestMatch: {} (distance: {}, score: {:.2})",
                    closest, m.distance, m.score
                ));
            }
            None => lines.push("  closestMatch: null".to_string()),
        }
    }
    if !any_match {
        lines.push(
            "\nCompared by Damerau-Levenshtein distance: all names are unique.".to_string(),
        );
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(original: &str, closest: Option<&str>, distance: usize, score: f64) -> SimilarityMatch {
        SimilarityMatch {
            original: original.to_string(),
            closest_match: closest.map(str::to_string),
            distance,
            score,
        }
    }

    #[test]
    fn empty_report_for_no_matches() {
        assert_eq!(format_missing_games("Steam", &[]), "");
    }

    #[test]
    fn report_lists_matches_and_misses() {
        let text = format_missing_games(
            "Steam",
            &[
                matched("Portal2", Some("Portal 2"), 1, 0.875),
                matched("Zzz", None, 3, 0.0),
            ],
        );
        assert_eq!(
            text,
            "Games from Steam not found in database:\n\
             \n• original: Portal2\n\
             \x20 closestMatch: Portal 2 (distance: 1, score: 0.88)\n\
             \n• original: Zzz\n\
             \x20 closestMatch: null"
        );
    }

    #[test]
    fn report_notes_when_nothing_matched() {
        let text = format_missing_games("Steam", &[matched("Zzz", None, 3, 0.0)]);
        assert!(text.ends_with("all names are unique."));
    }
}
