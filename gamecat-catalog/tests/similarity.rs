use gamecat_catalog::similarity::{SimilarityThresholds, find_closest_match};

#[test]
fn identical_name_matches_with_full_score() {
    let t = SimilarityThresholds::default();
    for name in ["A", "Hades", "Half-Life 2", "The Witcher 3: Wild Hunt"] {
        let m = find_closest_match(name, &[name], &t);
        assert_eq!(m.closest_match.as_deref(), Some(name));
        assert_eq!(m.distance, 0);
        assert_eq!(m.score, 1.0);
    }
}

#[test]
fn no_candidates_is_a_null_match_with_zero_score() {
    let t = SimilarityThresholds::default();
    let m = find_closest_match::<&str>("Hades", &[], &t);
    assert_eq!(m.closest_match, None);
    assert_eq!(m.distance, 0);
    assert_eq!(m.score, 0.0);
}

#[test]
fn two_empty_strings_score_one() {
    let t = SimilarityThresholds::default();
    let m = find_closest_match("", &[""], &t);
    assert_eq!(m.closest_match.as_deref(), Some(""));
    assert_eq!(m.score, 1.0);
}

#[test]
fn short_names_accept_one_edit_and_reject_two() {
    let t = SimilarityThresholds::default();

    let one = find_closest_match("Hades", &["Hadez"], &t);
    assert_eq!(one.distance, 1);
    assert_eq!(one.closest_match.as_deref(), Some("Hadez"));

    let two = find_closest_match("Hades", &["Haxez"], &t);
    assert_eq!(two.distance, 2);
    assert_eq!(two.closest_match, None);
    // nearest miss is still reported
    assert!((two.score - 0.6).abs() < 1e-9);
}

#[test]
fn transposition_counts_as_one_edit() {
    let t = SimilarityThresholds::default();
    let m = find_closest_match("Hdaes", &["Hades"], &t);
    assert_eq!(m.distance, 1);
    assert!(m.closest_match.is_some());
}

#[test]
fn comparison_ignores_case_and_spacing() {
    let t = SimilarityThresholds::default();
    let m = find_closest_match("  PORTAL   2 ", &["Portal 2"], &t);
    assert_eq!(m.distance, 0);
    assert_eq!(m.closest_match.as_deref(), Some("Portal 2"));
}

#[test]
fn ties_go_to_the_first_candidate() {
    let t = SimilarityThresholds::default();
    let m = find_closest_match("Doom", &["Door", "Boom", "Doom II"], &t);
    assert_eq!(m.distance, 1);
    assert_eq!(m.closest_match.as_deref(), Some("Door"));
}

#[test]
fn length_prefilter_falls_back_to_all_candidates() {
    let t = SimilarityThresholds::default();
    // Every candidate differs in length by more than three characters.
    let m = find_closest_match(
        "Celeste",
        &["Celeste Farewell Edition", "Cel"],
        &t,
    );
    assert_eq!(m.distance, 4);
    assert_eq!(m.closest_match, None);
}

#[test]
fn prefilter_excludes_far_lengths_when_others_remain() {
    let t = SimilarityThresholds::default();
    // "Cel" is outside the length window, "Celestia" is inside it.
    let m = find_closest_match("Celeste", &["Cel", "Celestia"], &t);
    assert_eq!(m.closest_match.as_deref(), Some("Celestia"));
    assert_eq!(m.distance, 2);
}

#[test]
fn long_names_accept_on_score() {
    let t = SimilarityThresholds::default();
    let original = "The Legend of Zelda: Breath of the Wild";
    let candidate = "Legend of Zelda: Breath of the Wild";
    let m = find_closest_match(original, &[candidate], &t);
    assert!(m.distance > 3);
    assert!(m.score >= 0.85);
    assert_eq!(m.closest_match.as_deref(), Some(candidate));
}
