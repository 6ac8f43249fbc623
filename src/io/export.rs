//! Export computed rows to CSV or JSON.
//!
//! The CSV keeps the spreadsheet's column names so the file can be pasted
//! back next to the source data.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{ComputedRow, ExportFormat};
use crate::error::AppError;
use crate::report::Summary;

const CSV_HEADER: [&str; 10] = [
    "Line",
    "Start Date",
    "Term",
    "Interest Rate",
    "Principal",
    "Frequency",
    "Bank",
    "Interval (months)",
    "Next Interest Date",
    "Interest Amount",
];

#[derive(Serialize)]
struct JsonExport<'a> {
    tool: &'static str,
    as_of: NaiveDate,
    summary: &'a Summary,
    rows: &'a [ComputedRow],
}

/// Write the export file in the requested format.
pub fn write_export(
    path: &Path,
    format: ExportFormat,
    as_of: NaiveDate,
    summary: &Summary,
    rows: &[ComputedRow],
) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export file '{}': {e}", path.display())))?;

    match format {
        ExportFormat::Csv => write_results_csv(file, rows),
        ExportFormat::Json => write_results_json(file, as_of, summary, rows),
    }
}

/// One CSV line per row, display values only.
pub fn write_results_csv<W: Write>(writer: W, rows: &[ComputedRow]) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for r in rows {
        let d = &r.display;
        let line = r.line.to_string();
        wtr.write_record([
            line.as_str(),
            d.start_date.as_str(),
            d.term.as_str(),
            d.interest_rate.as_str(),
            d.principal.as_str(),
            d.frequency.as_str(),
            d.bank.as_str(),
            d.interval.as_str(),
            d.next_payment.as_str(),
            d.interest_amount.as_str(),
        ])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    wtr.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))
}

/// Typed and display values plus the batch summary.
pub fn write_results_json<W: Write>(
    writer: W,
    as_of: NaiveDate,
    summary: &Summary,
    rows: &[ComputedRow],
) -> Result<(), AppError> {
    let export = JsonExport {
        tool: "isched",
        as_of,
        summary,
        rows,
    };
    serde_json::to_writer_pretty(writer, &export)
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))
}
