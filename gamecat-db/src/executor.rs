//! Running multi-statement SQL scripts against the catalog database.
//!
//! Each script runs on a fresh connection inside one transaction: a failing
//! statement rolls back the whole script. Scripts run one after another are
//! independent; nothing here spans more than one script.

use std::io;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read SQL script {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Failed to open database {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },
    #[error("SQLite error in {script}: {source}")]
    Execute {
        script: String,
        source: rusqlite::Error,
    },
}

/// Read `script_path` and execute it against the database at `db_path`.
pub fn run_script(script_path: &Path, db_path: &Path) -> Result<(), ScriptError> {
    let sql = std::fs::read_to_string(script_path).map_err(|e| ScriptError::Read {
        path: script_path.to_path_buf(),
        source: e,
    })?;
    let label = script_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| script_path.display().to_string());
    run_sql(&sql, &label, db_path)
}

/// Execute `sql` as one batch in its own transaction. `label` names the
/// script in errors and logs.
pub fn run_sql(sql: &str, label: &str, db_path: &Path) -> Result<(), ScriptError> {
    let mut conn = Connection::open(db_path).map_err(|e| ScriptError::Open {
        path: db_path.to_path_buf(),
        source: e,
    })?;
    let execute_err = |e: rusqlite::Error| ScriptError::Execute {
        script: label.to_string(),
        source: e,
    };

    let tx = conn.transaction().map_err(execute_err)?;
    tx.execute_batch(sql).map_err(execute_err)?;
    tx.commit().map_err(execute_err)?;

    log::debug!("Executed {label} against {}", db_path.display());
    Ok(())
}
