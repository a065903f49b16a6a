//! SQLite store for the game catalog.
//!
//! The store is never updated in place: every import drops and recreates the
//! schema, then inserts the dictionaries, the games, and the game/platform
//! links generated from the spreadsheet (via rusqlite with the bundled
//! feature). Reads go through [`CatalogQueryRepository`].

pub mod dictionaries;
pub mod dml;
pub mod executor;
pub mod rebuild;
pub mod repository;
pub mod scripts;

pub use dictionaries::{DictionaryCompiler, DictionaryError};
pub use dml::{CatalogGame, FieldValue, ImportPlan, PlatformAssociation, SkippedRow, plan_import};
pub use executor::{ScriptError, run_script};
pub use rebuild::{CatalogRebuilder, RebuildError, RebuildLock, RebuildReport, RebuildStep};
pub use repository::{
    CatalogQueryRepository, GameDetails, GameListEntry, RepositoryError, SpendTime, SpendTimeMode,
};
pub use scripts::install_scripts;
