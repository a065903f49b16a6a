use std::fs;

use gamecat_db::executor::{ScriptError, run_script, run_sql};
use rusqlite::Connection;
use tempfile::TempDir;

fn count(db: &std::path::Path, table: &str) -> i64 {
    let conn = Connection::open(db).unwrap();
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .unwrap()
}

#[test]
fn script_runs_every_statement() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("test.db");
    let script = tmp.path().join("script.sql");
    fs::write(
        &script,
        "CREATE TABLE t (v INTEGER);\nINSERT INTO t VALUES (1);\nINSERT INTO t VALUES (2);\n",
    )
    .unwrap();

    run_script(&script, &db).unwrap();
    assert_eq!(count(&db, "t"), 2);
}

#[test]
fn failing_statement_rolls_back_whole_script() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("test.db");
    run_sql("CREATE TABLE t (v INTEGER NOT NULL);", "setup", &db).unwrap();

    let err = run_sql(
        "INSERT INTO t VALUES (1); INSERT INTO t VALUES (NULL);",
        "bad.sql",
        &db,
    )
    .unwrap_err();

    assert!(matches!(err, ScriptError::Execute { ref script, .. } if script == "bad.sql"));
    assert_eq!(count(&db, "t"), 0);
}

#[test]
fn earlier_scripts_stay_applied_when_a_later_one_fails() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("test.db");

    run_sql("CREATE TABLE t (v INTEGER);", "one", &db).unwrap();
    run_sql("INSERT INTO t VALUES (1);", "two", &db).unwrap();
    assert!(run_sql("INSERT INTO missing VALUES (1);", "three", &db).is_err());

    assert_eq!(count(&db, "t"), 1);
}

#[test]
fn missing_script_file_is_a_read_error() {
    let tmp = TempDir::new().unwrap();
    let err = run_script(&tmp.path().join("nope.sql"), &tmp.path().join("db")).unwrap_err();
    assert!(matches!(err, ScriptError::Read { .. }));
}
