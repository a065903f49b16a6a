//! Full rebuild of the catalog database from the spreadsheet of record.
//!
//! A rebuild always runs five scripts in order: drop tables, create tables,
//! dictionaries, games, platform associations. Each script commits on its
//! own. When a later script fails the earlier ones stay applied; the error
//! names exactly which steps committed so the state is never ambiguous, and
//! re-running the rebuild recovers because it starts by dropping everything.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use gamecat_catalog::validate::describe_errors;
use gamecat_catalog::{CatalogConfig, Sheet, SheetError};
use thiserror::Error;

use crate::dictionaries::{DictionaryCompiler, DictionaryError};
use crate::dml::{ImportPlan, plan_import, render_associations, render_games};
use crate::executor::{ScriptError, run_script};
use crate::scripts;

/// One script of the rebuild sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildStep {
    DropTables,
    CreateTables,
    Dictionaries,
    Games,
    PlatformAssociations,
}

impl RebuildStep {
    /// Every step, in execution order.
    pub const ALL: [RebuildStep; 5] = [
        Self::DropTables,
        Self::CreateTables,
        Self::Dictionaries,
        Self::Games,
        Self::PlatformAssociations,
    ];
}

impl fmt::Display for RebuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DropTables => "drop tables",
            Self::CreateTables => "create tables",
            Self::Dictionaries => "dictionaries",
            Self::Games => "games",
            Self::PlatformAssociations => "platform associations",
        };
        f.write_str(name)
    }
}

fn describe_steps(steps: &[RebuildStep]) -> String {
    if steps.is_empty() {
        return "none".to_string();
    }
    steps
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum RebuildError {
    #[error("Required SQL script not found: {}", .0.display())]
    MissingScript(PathBuf),
    #[error(
        "Another rebuild is running (lock file {}); remove it if no rebuild is in progress",
        .0.display()
    )]
    Busy(PathBuf),
    #[error("Lock file error on {}: {source}", .path.display())]
    Lock { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Sheet(#[from] SheetError),
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
    #[error("Failed to write {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error(
        "Rebuild failed at step '{failed}' (committed: {}): {source}",
        describe_steps(.completed)
    )]
    Partial {
        completed: Vec<RebuildStep>,
        failed: RebuildStep,
        source: ScriptError,
    },
}

/// Summary of a successful rebuild.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebuildReport {
    pub imported: usize,
    pub skipped: usize,
    pub associations: usize,
}

// ── Single-flight lock ──────────────────────────────────────────────────────

/// Exclusive claim on rebuilding one database file.
///
/// The lock is a sibling file created with create-new semantics, so it
/// excludes other threads and other processes alike. Dropping the guard
/// removes the file.
#[derive(Debug)]
pub struct RebuildLock {
    path: PathBuf,
}

impl RebuildLock {
    /// Path of the lock file guarding `db_path`.
    pub fn lock_path(db_path: &Path) -> PathBuf {
        let mut name = db_path.as_os_str().to_os_string();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Claim the lock or fail fast with [`RebuildError::Busy`]. Creates the
    /// database's parent directory when missing.
    pub fn acquire(db_path: &Path) -> Result<Self, RebuildError> {
        let path = Self::lock_path(db_path);
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| RebuildError::Lock {
                path: path.clone(),
                source: e,
            })?;
        }
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(RebuildError::Busy(path));
            }
            Err(e) => return Err(RebuildError::Lock { path, source: e }),
        };
        // Informational only.
        let _ = writeln!(file, "{}", std::process::id());
        Ok(Self { path })
    }
}

impl Drop for RebuildLock {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            log::warn!("Failed to remove lock file {}: {e}", self.path.display());
        }
    }
}

// ── Rebuilder ───────────────────────────────────────────────────────────────

/// Regenerates the catalog database from the sheet.
pub struct CatalogRebuilder<'a> {
    config: &'a CatalogConfig,
    drop_script: PathBuf,
    create_script: PathBuf,
    work_dir: PathBuf,
}

impl<'a> CatalogRebuilder<'a> {
    /// Build a rebuilder over the configured SQL and work directories.
    ///
    /// Fails immediately when the drop or create script is missing.
    pub fn new(config: &'a CatalogConfig) -> Result<Self, RebuildError> {
        let drop_script = config.paths.sql_dir.join(scripts::DROP_TABLES);
        let create_script = config.paths.sql_dir.join(scripts::CREATE_TABLES);
        for script in [&drop_script, &create_script] {
            if !script.is_file() {
                return Err(RebuildError::MissingScript(script.clone()));
            }
        }
        Ok(Self {
            config,
            drop_script,
            create_script,
            work_dir: config.paths.work_dir.clone(),
        })
    }

    /// Rebuild the configured database from the configured sheet.
    pub fn rebuild_configured(&self) -> Result<RebuildReport, RebuildError> {
        self.rebuild(&self.config.paths.sheet, &self.config.paths.database)
    }

    /// Rebuild `db_path` from the sheet at `sheet_path`.
    ///
    /// Invalid rows are skipped and logged; they never fail the rebuild.
    pub fn rebuild(&self, sheet_path: &Path, db_path: &Path) -> Result<RebuildReport, RebuildError> {
        let _lock = RebuildLock::acquire(db_path)?;

        let sheet = Sheet::load(sheet_path)?;
        let plan = plan_import(&sheet, self.config);
        for skipped in &plan.skipped {
            log::warn!(
                "Skipping row {} ('{}'): {}",
                skipped.row_number,
                skipped.name,
                describe_errors(&skipped.errors)
            );
        }

        let step_scripts = self.write_dml(&plan)?;
        let mut completed = Vec::new();
        for (step, script) in RebuildStep::ALL.into_iter().zip(step_scripts.iter()) {
            if let Err(source) = run_script(script, db_path) {
                log::error!(
                    "Rebuild of {} failed at '{step}'; committed steps: {}",
                    db_path.display(),
                    describe_steps(&completed)
                );
                return Err(RebuildError::Partial {
                    completed,
                    failed: step,
                    source,
                });
            }
            completed.push(step);
        }

        let report = RebuildReport {
            imported: plan.games.len(),
            skipped: plan.skipped.len(),
            associations: plan.associations.len(),
        };
        log::info!(
            "Rebuilt {}: {} games imported, {} rows skipped",
            db_path.display(),
            report.imported,
            report.skipped
        );
        Ok(report)
    }

    /// Write the three generated scripts and return all five script paths in
    /// step order.
    fn write_dml(&self, plan: &ImportPlan) -> Result<[PathBuf; 5], RebuildError> {
        std::fs::create_dir_all(&self.work_dir).map_err(|e| RebuildError::Io {
            path: self.work_dir.clone(),
            source: e,
        })?;

        let dictionaries = self.work_dir.join(scripts::DML_DICTIONARIES);
        DictionaryCompiler::new(self.config).compile_dictionaries(&dictionaries)?;

        let games = self.work_dir.join(scripts::DML_GAMES);
        write_file(&games, &render_games(&plan.games))?;

        let associations = self.work_dir.join(scripts::DML_GAMES_ON_PLATFORMS);
        write_file(&associations, &render_associations(&plan.associations))?;

        Ok([
            self.drop_script.clone(),
            self.create_script.clone(),
            dictionaries,
            games,
            associations,
        ])
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), RebuildError> {
    std::fs::write(path, contents).map_err(|e| RebuildError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
