mod common;

use common::*;
use gamecat_catalog::{CatalogRow, Sheet};
use gamecat_sync::review::select_review_targets;
use gamecat_sync::{ReviewSynchronizer, SilentProgress, SyncError, SyncMode, SyncOutcome};
use tempfile::TempDir;

fn scored(name: &str, press: &str, user: &str) -> CatalogRow {
    let mut row = game(name, "Steam", "Completed");
    row.press_score = press.to_string();
    row.user_score = user.to_string();
    row
}

#[test]
fn partial_mode_skips_rows_with_both_scores() {
    let tmp = TempDir::new().unwrap();
    let config = config_in(tmp.path());
    write_sheet(&config.paths.sheet, vec![scored("Hades", "9.3", "8.8")]);

    let source = FakeReviews::new().with_page("Hades", 95.0, "9.0");
    let calls = source.calls.clone();
    let outcome = ReviewSynchronizer::new(&config, source, no_delay().with_mode(SyncMode::Partial))
        .unwrap()
        .synchronize(&SilentProgress)
        .unwrap();

    assert_eq!(outcome, SyncOutcome::NothingToSync);
    assert_eq!(calls.get(), 0);
    assert!(!config.paths.database.exists());
}

#[test]
fn partial_selection_keeps_rows_missing_either_score() {
    let mut sheet = Sheet::new();
    sheet.write_row(2, scored("Both", "9.3", "8.8")).unwrap();
    sheet.write_row(3, scored("No User", "9.3", "none")).unwrap();
    sheet.write_row(4, scored("No Press", "", "8.8")).unwrap();

    let names: Vec<String> = select_review_targets(&sheet, SyncMode::Partial)
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["No User".to_string(), "No Press".to_string()]);
    assert_eq!(select_review_targets(&sheet, SyncMode::Full).len(), 3);
}

#[test]
fn full_sync_searches_fetches_and_rebuilds() {
    let tmp = TempDir::new().unwrap();
    let config = config_in(tmp.path());
    let mut known = game("Celeste", "Switch", "Completed");
    known.metacritic_url = page_url("Celeste");
    write_sheet(
        &config.paths.sheet,
        vec![
            game("Hades", "Steam", "Not Started"),
            known,
            game("Obscure Game", "Steam", "Not Started"),
        ],
    );

    let source = FakeReviews::new()
        .with_page("Hades", 93.0, "8.8")
        .with_page("Celeste", 92.0, "8.6");
    let searched = source.searched.clone();
    let outcome = ReviewSynchronizer::new(&config, source, no_delay())
        .unwrap()
        .synchronize(&SilentProgress)
        .unwrap();

    let SyncOutcome::Synced(report) = outcome else {
        panic!("expected a sync");
    };
    assert_eq!(report.processed, 3);
    assert_eq!(report.updated, 2);
    assert_eq!(report.not_found, 1);
    assert_eq!(report.failed, 0);
    assert_eq!(report.rebuild.imported, 3);

    // Celeste already had a review URL.
    assert_eq!(
        *searched.borrow(),
        vec!["Hades".to_string(), "Obscure Game".to_string()]
    );

    let hades = load_row(&config.paths.sheet, "Hades");
    assert_eq!(hades.press_score, "9.3");
    assert_eq!(hades.user_score, "8.8");
    assert_eq!(hades.release_date, "September 17, 2020");
    assert_eq!(hades.metacritic_url, page_url("Hades"));

    let obscure = load_row(&config.paths.sheet, "Obscure Game");
    assert_eq!(obscure.press_score, "none");
}

#[test]
fn page_without_scores_still_records_its_url() {
    let tmp = TempDir::new().unwrap();
    let config = config_in(tmp.path());
    write_sheet(&config.paths.sheet, vec![game("Unreleased", "Steam", "Not Started")]);

    let source = FakeReviews::new().with_empty_page("Unreleased");
    let outcome = ReviewSynchronizer::new(&config, source, no_delay())
        .unwrap()
        .synchronize(&SilentProgress)
        .unwrap();

    let SyncOutcome::Synced(report) = outcome else {
        panic!("expected a sync");
    };
    assert_eq!(report.updated, 0);
    assert_eq!(report.not_found, 1);

    let row = load_row(&config.paths.sheet, "Unreleased");
    assert_eq!(row.metacritic_url, page_url("Unreleased"));
    assert_eq!(row.press_score, "none");
    assert_eq!(row.release_date, "December 12, 4712");
}

#[test]
fn second_run_reuses_the_recorded_url() {
    let tmp = TempDir::new().unwrap();
    let config = config_in(tmp.path());
    let mut row = game("Unreleased", "Steam", "Not Started");
    row.metacritic_url = page_url("Unreleased");
    write_sheet(&config.paths.sheet, vec![row]);

    let source = FakeReviews::new().with_empty_page("Unreleased");
    let searched = source.searched.clone();
    ReviewSynchronizer::new(&config, source, no_delay())
        .unwrap()
        .synchronize(&SilentProgress)
        .unwrap();

    assert!(searched.borrow().is_empty());
}

#[test]
fn failed_row_is_skipped() {
    let tmp = TempDir::new().unwrap();
    let config = config_in(tmp.path());
    write_sheet(
        &config.paths.sheet,
        vec![
            game("Broken", "Steam", "Not Started"),
            game("Hades", "Steam", "Not Started"),
        ],
    );

    let source = FakeReviews::new()
        .with_page("Hades", 93.0, "8.8")
        .with_failure("Broken");
    let outcome = ReviewSynchronizer::new(&config, source, no_delay())
        .unwrap()
        .synchronize(&SilentProgress)
        .unwrap();

    let SyncOutcome::Synced(report) = outcome else {
        panic!("expected a sync");
    };
    assert_eq!(report.failed, 1);
    assert_eq!(report.updated, 1);
    assert_eq!(load_row(&config.paths.sheet, "Broken").press_score, "none");
    assert_eq!(load_row(&config.paths.sheet, "Hades").press_score, "9.3");
}

#[test]
fn rejected_credentials_stop_the_batch() {
    let tmp = TempDir::new().unwrap();
    let config = config_in(tmp.path());
    write_sheet(
        &config.paths.sheet,
        vec![
            game("Hades", "Steam", "Not Started"),
            game("reject", "Steam", "Not Started"),
            game("Celeste", "Steam", "Not Started"),
        ],
    );

    let source = FakeReviews::new()
        .with_page("Hades", 93.0, "8.8")
        .with_page("Celeste", 92.0, "8.6");
    let searched = source.searched.clone();
    let err = ReviewSynchronizer::new(&config, source, no_delay())
        .unwrap()
        .synchronize(&SilentProgress)
        .unwrap_err();

    assert!(matches!(err, SyncError::Source { .. }));
    assert_eq!(searched.borrow().len(), 2);
    // Work done before the failure is kept, but nothing is rebuilt.
    assert_eq!(load_row(&config.paths.sheet, "Hades").press_score, "9.3");
    assert_eq!(load_row(&config.paths.sheet, "Celeste").press_score, "none");
    assert!(!config.paths.database.exists());
}

#[test]
fn limit_caps_processed_rows() {
    let tmp = TempDir::new().unwrap();
    let config = config_in(tmp.path());
    write_sheet(
        &config.paths.sheet,
        vec![
            game("Hades", "Steam", "Not Started"),
            game("Celeste", "Steam", "Not Started"),
        ],
    );

    let source = FakeReviews::new()
        .with_page("Hades", 93.0, "8.8")
        .with_page("Celeste", 92.0, "8.6");
    let outcome = ReviewSynchronizer::new(&config, source, no_delay().with_limit(Some(1)))
        .unwrap()
        .synchronize(&SilentProgress)
        .unwrap();

    let SyncOutcome::Synced(report) = outcome else {
        panic!("expected a sync");
    };
    assert_eq!(report.processed, 1);
    assert_eq!(load_row(&config.paths.sheet, "Celeste").press_score, "none");
}

#[test]
fn missing_scripts_fail_before_any_request() {
    let tmp = TempDir::new().unwrap();
    let mut config = config_in(tmp.path());
    config.paths.sql_dir = tmp.path().join("nowhere");

    let source = FakeReviews::new();
    let calls = source.calls.clone();
    let result = ReviewSynchronizer::new(&config, source, no_delay());
    assert!(matches!(result, Err(SyncError::Rebuild(_))));
    assert_eq!(calls.get(), 0);
}
