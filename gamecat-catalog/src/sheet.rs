//! The spreadsheet of record, stored as a UTF-8 CSV file.
//!
//! Rows are addressed by their spreadsheet number: the header is row 1 and
//! the first data row is row 2. Blank rows are preserved on save so row
//! numbers stay stable across a load/save cycle.

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::types::{CatalogRow, HEADER};

/// Number of the first data row.
pub const FIRST_DATA_ROW: usize = 2;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("I/O error on {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Row {0} is not a data row")]
    NotADataRow(usize),
}

/// An in-memory copy of the spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    header: Vec<String>,
    rows: Vec<CatalogRow>,
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}

impl Sheet {
    /// An empty sheet carrying only the standard header.
    pub fn new() -> Self {
        Self {
            header: HEADER.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Load the sheet at `path`.
    pub fn load(path: &Path) -> Result<Self, SheetError> {
        let file = std::fs::File::open(path).map_err(|e| SheetError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_reader(file).map_err(|e| SheetError::Csv {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Parse CSV content. The first record is the header; a missing header
    /// is replaced by the standard one.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = reader.records();
        let header = match records.next() {
            Some(record) => record?.iter().map(|c| c.to_string()).collect(),
            None => return Ok(Self::new()),
        };

        let mut rows = Vec::new();
        for record in records {
            let record = record?;
            let cells: Vec<&str> = record.iter().collect();
            rows.push(CatalogRow::from_cells(&cells));
        }

        Ok(Self { header, rows })
    }

    /// Data rows with their row numbers, skipping rows whose every cell is
    /// empty.
    pub fn read_rows(&self) -> impl Iterator<Item = (usize, &CatalogRow)> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.is_blank())
            .map(|(i, row)| (i + FIRST_DATA_ROW, row))
    }

    /// Row number of the first row whose name equals `name` exactly.
    pub fn find_row_by_name(&self, name: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| !row.is_blank() && row.name == name)
            .map(|i| i + FIRST_DATA_ROW)
    }

    /// The row at `number`, if it exists.
    pub fn row(&self, number: usize) -> Option<&CatalogRow> {
        number
            .checked_sub(FIRST_DATA_ROW)
            .and_then(|i| self.rows.get(i))
    }

    /// Replace the row at `number`. Writing past the end appends blank rows
    /// up to `number`.
    pub fn write_row(&mut self, number: usize, row: CatalogRow) -> Result<(), SheetError> {
        let index = number
            .checked_sub(FIRST_DATA_ROW)
            .ok_or(SheetError::NotADataRow(number))?;
        if index >= self.rows.len() {
            self.rows.resize_with(index + 1, CatalogRow::default);
        }
        self.rows[index] = row;
        Ok(())
    }

    /// Number of the row after the last non-blank row.
    pub fn first_free_row(&self) -> usize {
        let used = self
            .rows
            .iter()
            .rposition(|row| !row.is_blank())
            .map(|i| i + 1)
            .unwrap_or(0);
        used + FIRST_DATA_ROW
    }

    /// Names of every data row, in sheet order.
    pub fn names(&self) -> Vec<&str> {
        self.read_rows().map(|(_, row)| row.name.as_str()).collect()
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Serialize to CSV.
    pub fn to_writer<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(writer);
        writer.write_record(&self.header)?;
        for row in &self.rows {
            writer.write_record(row.to_cells())?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Save to `path` atomically (temporary file, then rename).
    pub fn save(&self, path: &Path) -> Result<(), SheetError> {
        let io_err = |e: io::Error| SheetError::Io {
            path: path.display().to_string(),
            source: e,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let tmp = path.with_extension("csv.tmp");
        let file = std::fs::File::create(&tmp).map_err(io_err)?;
        self.to_writer(io::BufWriter::new(file))
            .map_err(|e| SheetError::Csv {
                path: tmp.display().to_string(),
                source: e,
            })?;
        std::fs::rename(&tmp, path).map_err(io_err)?;
        log::debug!("Saved {} rows to {}", self.rows.len(), path.display());
        Ok(())
    }
}
