//! CSV ingest.
//!
//! Reads a local CSV export of the spreadsheet into a `RawTable`. Typing and
//! validation of the cells is the normalizer's job; this module only cares
//! about getting rows out of the file.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::PathBuf;

use crate::data::RowSource;
use crate::domain::RawTable;
use crate::error::SourceError;

/// A CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl RowSource for CsvSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<RawTable, SourceError> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SourceError::NotFound(format!("CSV file '{}'", self.path.display())),
            ErrorKind::PermissionDenied => SourceError::Unauthorized(format!("CSV file '{}'", self.path.display())),
            _ => SourceError::Malformed(format!("Failed to open CSV '{}': {e}", self.path.display())),
        })?;
        read_table(file, &self.describe())
    }
}

/// Read a CSV stream whose first record is the header row.
///
/// Malformed records are skipped with a warning; the rest of the file is kept.
pub fn read_table<R: Read>(reader: R, what: &str) -> Result<RawTable, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| SourceError::Malformed(format!("Failed to read CSV headers: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(SourceError::Empty(what.to_string()));
    }

    let mut data = Vec::new();
    let mut lines = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // records() starts right after the header; lines are 1-based.
        let line = idx + 2;
        match result {
            Ok(record) => {
                data.push(record.iter().map(str::to_string).collect());
                lines.push(line);
            }
            Err(e) => tracing::warn!(line, error = %e, "skipping unreadable CSV record"),
        }
    }

    let mut table = RawTable::from_grid(headers, data);
    for (row, line) in table.rows.iter_mut().zip(lines) {
        row.line = line;
    }
    Ok(table)
}
