use std::path::Path;

use gamecat_catalog::{CatalogConfig, CatalogRow, Sheet};
use gamecat_db::scripts;
use gamecat_db::{CatalogRebuilder, RebuildError, RebuildLock, RebuildStep, install_scripts};
use rusqlite::Connection;
use tempfile::TempDir;

fn config_in(dir: &Path) -> CatalogConfig {
    let mut config = CatalogConfig::builtin();
    config.paths.sheet = dir.join("games.csv");
    config.paths.database = dir.join("games.db");
    config.paths.sql_dir = dir.join("sql");
    config.paths.work_dir = dir.join("work");
    install_scripts(&config.paths.sql_dir).unwrap();
    config
}

fn game(name: &str, platforms: &str, status: &str) -> CatalogRow {
    let mut row = CatalogRow::new_entry(name, platforms, status);
    row.press_score = "9".to_string();
    row
}

fn write_sheet(path: &Path, rows: Vec<CatalogRow>) {
    let mut sheet = Sheet::new();
    for (i, row) in rows.into_iter().enumerate() {
        sheet.write_row(i + 2, row).unwrap();
    }
    sheet.save(path).unwrap();
}

fn count(db: &Path, sql: &str) -> i64 {
    let conn = Connection::open(db).unwrap();
    conn.query_row(sql, [], |r| r.get(0)).unwrap()
}

#[test]
fn rebuild_imports_valid_rows_and_skips_the_rest() {
    let tmp = TempDir::new().unwrap();
    let config = config_in(tmp.path());
    write_sheet(
        &config.paths.sheet,
        vec![
            game("Alpha", "Steam, Switch", "Completed"),
            game("", "Steam", "Completed"),
            game("Beta", "NOT DEFINED", "Not Started"),
        ],
    );

    let report = CatalogRebuilder::new(&config)
        .unwrap()
        .rebuild_configured()
        .unwrap();

    assert_eq!(report.imported, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.associations, 2);

    let db = &config.paths.database;
    assert_eq!(count(db, "SELECT COUNT(*) FROM games"), 2);
    assert_eq!(count(db, "SELECT COUNT(*) FROM games_on_platforms"), 2);
    assert_eq!(count(db, "SELECT COUNT(*) FROM status_dictionary"), 3);
    assert_eq!(count(db, "SELECT COUNT(*) FROM platform_dictionary"), 9);
    assert_eq!(
        count(
            db,
            "SELECT platform_dictionary_id FROM platform_dictionary WHERE platform_name = 'Steam'"
        ),
        2
    );
}

#[test]
fn generated_scripts_land_in_the_work_dir() {
    let tmp = TempDir::new().unwrap();
    let config = config_in(tmp.path());
    write_sheet(&config.paths.sheet, vec![game("Alpha", "Steam", "Completed")]);

    CatalogRebuilder::new(&config)
        .unwrap()
        .rebuild_configured()
        .unwrap();

    for name in [
        scripts::DML_DICTIONARIES,
        scripts::DML_GAMES,
        scripts::DML_GAMES_ON_PLATFORMS,
    ] {
        assert!(config.paths.work_dir.join(name).is_file(), "{name} missing");
    }
}

#[test]
fn rebuilding_replaces_previous_contents() {
    let tmp = TempDir::new().unwrap();
    let config = config_in(tmp.path());
    let rebuilder = CatalogRebuilder::new(&config).unwrap();

    write_sheet(
        &config.paths.sheet,
        vec![
            game("Alpha", "Steam", "Completed"),
            game("Beta", "Steam", "Completed"),
        ],
    );
    rebuilder.rebuild_configured().unwrap();
    let first_id: String = Connection::open(&config.paths.database)
        .unwrap()
        .query_row("SELECT game_id FROM games WHERE game_name = 'Alpha'", [], |r| r.get(0))
        .unwrap();

    write_sheet(&config.paths.sheet, vec![game("Alpha", "Steam", "Completed")]);
    rebuilder.rebuild_configured().unwrap();
    let second_id: String = Connection::open(&config.paths.database)
        .unwrap()
        .query_row("SELECT game_id FROM games WHERE game_name = 'Alpha'", [], |r| r.get(0))
        .unwrap();

    assert_eq!(count(&config.paths.database, "SELECT COUNT(*) FROM games"), 1);
    assert_ne!(first_id, second_id);
}

#[test]
fn missing_create_script_fails_at_construction() {
    let tmp = TempDir::new().unwrap();
    let config = config_in(tmp.path());
    std::fs::remove_file(config.paths.sql_dir.join(scripts::CREATE_TABLES)).unwrap();

    match CatalogRebuilder::new(&config) {
        Err(RebuildError::MissingScript(path)) => {
            assert!(path.ends_with(scripts::CREATE_TABLES));
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected MissingScript"),
    }
}

#[test]
fn concurrent_rebuild_fails_fast() {
    let tmp = TempDir::new().unwrap();
    let config = config_in(tmp.path());
    write_sheet(&config.paths.sheet, vec![game("Alpha", "Steam", "Completed")]);
    let rebuilder = CatalogRebuilder::new(&config).unwrap();

    let held = RebuildLock::acquire(&config.paths.database).unwrap();
    assert!(matches!(
        rebuilder.rebuild_configured(),
        Err(RebuildError::Busy(_))
    ));
    drop(held);

    rebuilder.rebuild_configured().unwrap();
    assert!(!RebuildLock::lock_path(&config.paths.database).exists());
}

#[test]
fn database_directory_is_created_on_first_rebuild() {
    let tmp = TempDir::new().unwrap();
    let mut config = config_in(tmp.path());
    config.paths.database = tmp.path().join("store").join("nested").join("games.db");
    write_sheet(&config.paths.sheet, vec![game("Alpha", "Steam", "Completed")]);

    let report = CatalogRebuilder::new(&config)
        .unwrap()
        .rebuild_configured()
        .unwrap();

    assert_eq!(report.imported, 1);
    assert_eq!(count(&config.paths.database, "SELECT COUNT(*) FROM games"), 1);
    assert!(!RebuildLock::lock_path(&config.paths.database).exists());
}

#[test]
fn failing_step_reports_committed_steps() {
    let tmp = TempDir::new().unwrap();
    let config = config_in(tmp.path());
    write_sheet(&config.paths.sheet, vec![game("Alpha", "Steam", "Completed")]);
    let rebuilder = CatalogRebuilder::new(&config).unwrap();
    rebuilder.rebuild_configured().unwrap();

    let create = config.paths.sql_dir.join(scripts::CREATE_TABLES);
    std::fs::write(&create, "CREATE TABLE games (;").unwrap();

    match rebuilder.rebuild_configured() {
        Err(RebuildError::Partial {
            completed, failed, ..
        }) => {
            assert_eq!(completed, vec![RebuildStep::DropTables]);
            assert_eq!(failed, RebuildStep::CreateTables);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected a partial failure"),
    }

    // The drop committed, so the old tables are gone.
    let conn = Connection::open(&config.paths.database).unwrap();
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'games'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(tables, 0);
    assert!(!RebuildLock::lock_path(&config.paths.database).exists());

    // Fixing the script and re-running recovers.
    std::fs::write(&create, scripts::bundled(scripts::CREATE_TABLES).unwrap()).unwrap();
    rebuilder.rebuild_configured().unwrap();
    assert_eq!(count(&config.paths.database, "SELECT COUNT(*) FROM games"), 1);
}

#[test]
fn missing_sheet_is_reported() {
    let tmp = TempDir::new().unwrap();
    let config = config_in(tmp.path());

    let result = CatalogRebuilder::new(&config)
        .unwrap()
        .rebuild_configured();
    assert!(matches!(result, Err(RebuildError::Sheet(_))));
    assert!(!RebuildLock::lock_path(&config.paths.database).exists());
}
