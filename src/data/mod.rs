//! Row sources.
//!
//! A row source hands the core an untyped table. Reading, auth, retries and
//! timeouts all live here; the calculation core never sees them.

pub mod sheets;

pub use sheets::SheetsClient;

use crate::domain::{RawTable, SourceSpec};
use crate::error::{AppError, SourceError};
use crate::io::CsvSource;

pub trait RowSource {
    /// Human-readable name for reports and logs.
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<RawTable, SourceError>;
}

/// Build the row source selected on the command line.
pub fn open_source(spec: &SourceSpec, timeout_secs: u64) -> Result<Box<dyn RowSource>, AppError> {
    match spec {
        SourceSpec::Csv(path) => Ok(Box::new(CsvSource::new(path.clone()))),
        SourceSpec::Sheet { sheet_id, range } => Ok(Box::new(SheetsClient::from_env(
            sheet_id.clone(),
            range.clone(),
            timeout_secs,
        )?)),
    }
}
