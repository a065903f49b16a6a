//! Catalog spreadsheet model, configuration, validation, and fuzzy name
//! matching.
//!
//! This crate has no database or network dependencies. `gamecat-db` turns
//! validated rows into a relational store and `gamecat-sync` reconciles them
//! with external sources.

pub mod config;
pub mod dates;
pub mod sheet;
pub mod similarity;
pub mod types;
pub mod validate;

pub use config::{CatalogConfig, ConfigError, VocabularyEntry, config_path, load_config, save_config};
pub use sheet::{Sheet, SheetError};
pub use similarity::{SimilarityMatch, SimilarityThresholds, find_closest_match};
pub use types::*;
pub use validate::{RowValidator, ValidationError};
