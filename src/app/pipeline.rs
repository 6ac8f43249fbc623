//! Shared batch pipeline used by every subcommand.
//!
//! source fetch -> per-row evaluation (parallel) -> summary
//!
//! The subcommands then only differ in which sink they hand the batch to.

use chrono::{Local, NaiveDate};
use rayon::prelude::*;

use crate::calc::evaluate_row;
use crate::data::{RowSource, open_source};
use crate::domain::{Column, ComputedRow, RawTable, RunConfig};
use crate::error::{AppError, SourceError};
use crate::report::{Summary, summarize};

/// All computed outputs of one run.
#[derive(Debug, Clone)]
pub struct Batch {
    pub source: String,
    pub as_of: NaiveDate,
    pub missing_columns: Vec<Column>,
    pub rows: Vec<ComputedRow>,
    pub summary: Summary,
}

/// Fetch from the configured source and evaluate every row.
pub fn run_batch(config: &RunConfig) -> Result<Batch, AppError> {
    // "Now" is captured once so every row in the run agrees on it.
    let as_of = config.as_of.unwrap_or_else(|| Local::now().date_naive());
    let source = open_source(&config.source, config.timeout_secs)?;
    run_batch_with_source(source.as_ref(), as_of)
}

/// Execute the pipeline against an already-constructed source.
pub fn run_batch_with_source(source: &dyn RowSource, as_of: NaiveDate) -> Result<Batch, AppError> {
    let name = source.describe();
    tracing::info!(source = %name, "fetching rows");
    let table = source.fetch()?;

    if table.rows.is_empty() {
        return Err(SourceError::Empty(name).into());
    }
    Ok(evaluate_table(&table, as_of, name))
}

/// Evaluate every row of a table against one evaluation date.
pub fn evaluate_table(table: &RawTable, as_of: NaiveDate, source: String) -> Batch {
    let missing_columns = table.missing_columns();
    for column in &missing_columns {
        tracing::warn!(column = %column, "column missing from source; treating as empty");
    }

    let rows: Vec<ComputedRow> = table.rows.par_iter().map(|row| evaluate_row(row, as_of)).collect();
    let summary = summarize(&rows);
    tracing::info!(rows = summary.rows, due = summary.due, %as_of, "evaluated batch");

    Batch {
        source,
        as_of,
        missing_columns,
        rows,
        summary,
    }
}
