//! Fuzzy reconciliation of externally sourced game names with catalog names.
//!
//! Names are compared after normalization (trimmed, lowercased, whitespace
//! runs collapsed) using the Damerau-Levenshtein distance, which counts an
//! adjacent transposition as a single edit. A best candidate is only
//! accepted when it passes a rule bucketed by the length of the original
//! name, so short names need near-exact matches while long names may differ
//! by a few characters.

use serde::{Deserialize, Serialize};

/// Acceptance thresholds for [`find_closest_match`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityThresholds {
    /// Names up to this length are "short".
    pub short_length_max: usize,
    /// Names up to this length (and longer than short) are "medium".
    pub medium_length_max: usize,
    pub short_length_distance: usize,
    pub medium_length_distance: usize,
    pub long_length_distance: usize,
    pub medium_length_score: f64,
    pub long_length_score: f64,
    /// Candidates whose normalized length differs from the original by more
    /// than this are skipped, unless that would skip every candidate.
    pub length_diff_threshold: usize,
}

impl Default for SimilarityThresholds {
    fn default() -> Self {
        Self {
            short_length_max: 5,
            medium_length_max: 12,
            short_length_distance: 1,
            medium_length_distance: 2,
            long_length_distance: 3,
            medium_length_score: 0.80,
            long_length_score: 0.85,
            length_diff_threshold: 3,
        }
    }
}

/// Result of reconciling one external name against the catalog.
///
/// `distance` and `score` describe the best candidate found even when it was
/// rejected, so callers can show the nearest miss.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatch {
    pub original: String,
    pub closest_match: Option<String>,
    pub distance: usize,
    pub score: f64,
}

/// Trim, lowercase, and collapse whitespace runs to a single space.
pub fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// `1 - distance / max(len_a, len_b)`, or 1.0 when both are empty.
pub fn similarity_score(distance: usize, len_a: usize, len_b: usize) -> f64 {
    let max_len = len_a.max(len_b);
    if max_len == 0 {
        return 1.0;
    }
    1.0 - distance as f64 / max_len as f64
}

/// Whether a candidate at `distance`/`score` from an original of
/// `original_len` characters is close enough to report.
pub fn is_acceptable(
    distance: usize,
    score: f64,
    original_len: usize,
    thresholds: &SimilarityThresholds,
) -> bool {
    if original_len <= thresholds.short_length_max {
        distance <= thresholds.short_length_distance
    } else if original_len <= thresholds.medium_length_max {
        distance <= thresholds.medium_length_distance || score >= thresholds.medium_length_score
    } else {
        distance <= thresholds.long_length_distance || score >= thresholds.long_length_score
    }
}

/// Find the candidate closest to `original`.
///
/// Candidates are scanned once in input order and only a strictly smaller
/// distance replaces the current best, so ties resolve to the earliest
/// candidate. An empty candidate list yields a null match with distance 0
/// and score 0.0.
///
/// ```
/// use gamecat_catalog::similarity::{find_closest_match, SimilarityThresholds};
///
/// let m = find_closest_match("Portal 2", &["Portal", "Portal 2"], &SimilarityThresholds::default());
/// assert_eq!(m.closest_match.as_deref(), Some("Portal 2"));
/// assert_eq!(m.distance, 0);
/// ```
pub fn find_closest_match<S: AsRef<str>>(
    original: &str,
    candidates: &[S],
    thresholds: &SimilarityThresholds,
) -> SimilarityMatch {
    if candidates.is_empty() {
        return SimilarityMatch {
            original: original.to_string(),
            closest_match: None,
            distance: 0,
            score: 0.0,
        };
    }

    let original_norm = normalize(original);
    let original_len = original_norm.chars().count();

    let normalized: Vec<(usize, String, usize)> = candidates
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let n = normalize(c.as_ref());
            let len = n.chars().count();
            (i, n, len)
        })
        .collect();

    let mut pool: Vec<&(usize, String, usize)> = normalized
        .iter()
        .filter(|(_, _, len)| len.abs_diff(original_len) <= thresholds.length_diff_threshold)
        .collect();
    if pool.is_empty() {
        pool = normalized.iter().collect();
    }

    let mut best: Option<(usize, usize, f64)> = None;
    for (index, candidate, len) in pool {
        let distance = strsim::damerau_levenshtein(&original_norm, candidate);
        if best.is_none_or(|(_, best_distance, _)| distance < best_distance) {
            let score = similarity_score(distance, original_len, *len);
            best = Some((*index, distance, score));
        }
    }

    let (index, distance, score) = best.unwrap_or((0, 0, 0.0));
    let closest_match = is_acceptable(distance, score, original_len, thresholds)
        .then(|| candidates[index].as_ref().to_string());

    SimilarityMatch {
        original: original.to_string(),
        closest_match,
        distance,
        score,
    }
}
