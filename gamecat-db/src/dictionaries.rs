//! Dictionary DML: status and platform vocabularies as insert statements.

use std::io;
use std::path::{Path, PathBuf};

use gamecat_catalog::{CatalogConfig, VocabularyEntry};
use thiserror::Error;

use crate::dml::quote;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("Failed to write {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

/// Expands the configured vocabulary into dictionary inserts.
///
/// Values are emitted in dictionary order, so the n-th value receives id n
/// in a freshly created table. Platforms keep their configured order;
/// statuses follow [`CatalogConfig::dictionary_statuses`].
pub struct DictionaryCompiler<'a> {
    config: &'a CatalogConfig,
}

impl<'a> DictionaryCompiler<'a> {
    pub fn new(config: &'a CatalogConfig) -> Self {
        Self { config }
    }

    /// The full DML text for both dictionaries.
    pub fn render(&self) -> String {
        let tables = &self.config.tables;
        let mut out = String::new();
        render_insert(
            &mut out,
            &tables.status_table,
            &tables.status_column,
            self.config.dictionary_statuses(),
        );
        render_insert(
            &mut out,
            &tables.platform_table,
            &tables.platform_column,
            self.config.platforms.iter(),
        );
        out
    }

    /// Write the dictionary DML to `output`, replacing any previous file.
    pub fn compile_dictionaries(&self, output: &Path) -> Result<(), DictionaryError> {
        std::fs::write(output, self.render()).map_err(|e| DictionaryError::Io {
            path: output.to_path_buf(),
            source: e,
        })?;
        log::debug!(
            "Wrote {} statuses and {} platforms to {}",
            self.config.statuses.len(),
            self.config.platforms.len(),
            output.display()
        );
        Ok(())
    }
}

fn render_insert<'a>(
    out: &mut String,
    table: &str,
    column: &str,
    entries: impl IntoIterator<Item = &'a VocabularyEntry>,
) {
    let entries: Vec<&VocabularyEntry> = entries.into_iter().collect();
    if entries.is_empty() {
        out.push_str(&format!("-- no values for {table}\n\n"));
        return;
    }
    out.push_str(&format!("INSERT INTO {table} ({column})\nVALUES\n"));
    let values: Vec<String> = entries
        .iter()
        .map(|e| format!("   ({})", quote(&e.name)))
        .collect();
    out.push_str(&values.join(",\n"));
    out.push_str(";\n\n");
}
