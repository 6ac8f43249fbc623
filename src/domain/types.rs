//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between the row source, the calculation core and the sinks
//! - exported to JSON/CSV
//! - compared directly in tests

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Serialize, Serializer};

/// Columns the normalizer understands.
///
/// Header names are matched case-sensitively after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Column {
    StartDate,
    Term,
    InterestRate,
    Principal,
    Frequency,
    Bank,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::StartDate,
        Column::Term,
        Column::InterestRate,
        Column::Principal,
        Column::Frequency,
        Column::Bank,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::StartDate => "Start Date",
            Column::Term => "Term",
            Column::InterestRate => "Interest Rate",
            Column::Principal => "Principal",
            Column::Frequency => "Frequency",
            Column::Bank => "Bank",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// One untyped row as delivered by a row source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    /// 1-based line in the source (the header is line 1).
    pub line: usize,
    pub cells: HashMap<String, String>,
}

impl RawRow {
    pub fn get(&self, column: Column) -> Option<&str> {
        self.cells.get(column.header()).map(String::as_str)
    }
}

/// Ordered headers plus ordered rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Build a table from a header row and positional data rows.
    ///
    /// Short rows are allowed (trailing cells are absent). Extra cells beyond the
    /// header are dropped. On duplicate headers the first occurrence wins.
    pub fn from_grid(headers: Vec<String>, data: Vec<Vec<String>>) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| normalize_header_name(h)).collect();

        let rows = data
            .into_iter()
            .enumerate()
            .map(|(idx, cells)| {
                let mut map = HashMap::with_capacity(headers.len());
                for (name, value) in headers.iter().zip(cells) {
                    map.entry(name.clone()).or_insert(value);
                }
                RawRow {
                    line: idx + 2,
                    cells: map,
                }
            })
            .collect();

        Self { headers, rows }
    }

    /// Recognized columns with no matching header.
    pub fn missing_columns(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|c| !self.headers.iter().any(|h| h == c.header()))
            .collect()
    }
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet CSV exports sometimes carry a BOM on the first header.
    name.trim_start_matches('\u{feff}').trim().to_string()
}

/// A normalized row. Every field is optional; `None` is the absent marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    pub start_date: Option<NaiveDate>,
    pub term_months: Option<f64>,
    pub interest_rate_annual_percent: Option<f64>,
    pub principal: Option<f64>,
    pub frequency_label: Option<String>,
    pub bank_label: Option<String>,
}

/// A cell that was supplied but could not be used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowIssue {
    pub column: Column,
    pub raw: String,
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unusable `{}` value '{}'", self.column, self.raw)
    }
}

/// Known payment frequencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Monthly,
    Quarterly,
    EndOfTerm,
}

impl Frequency {
    /// Exact (case-sensitive) match on a trimmed label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Monthly" => Some(Frequency::Monthly),
            "Quarterly" => Some(Frequency::Quarterly),
            "End of Term" => Some(Frequency::EndOfTerm),
            _ => None,
        }
    }
}

/// Result of projecting the next payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPayment {
    Due(NaiveDate),
    TermEnded,
    InvalidData,
}

impl NextPayment {
    pub fn due_date(self) -> Option<NaiveDate> {
        match self {
            NextPayment::Due(date) => Some(date),
            NextPayment::TermEnded | NextPayment::InvalidData => None,
        }
    }
}

impl fmt::Display for NextPayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextPayment::Due(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            NextPayment::TermEnded => f.write_str("Term Ended"),
            NextPayment::InvalidData => f.write_str("Invalid Data"),
        }
    }
}

impl Serialize for NextPayment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Derived fields for one record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Schedule {
    pub interval_months: Option<f64>,
    pub next_payment: NextPayment,
    pub interest_amount: f64,
}

/// Presentation strings for one row. Never contains an absent value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub start_date: String,
    pub term: String,
    pub interest_rate: String,
    pub principal: String,
    pub frequency: String,
    pub bank: String,
    pub interval: String,
    pub next_payment: String,
    pub interest_amount: String,
}

/// Everything the sinks need for one input row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputedRow {
    pub line: usize,
    pub record: Record,
    pub schedule: Schedule,
    pub display: DisplayRow,
    pub issues: Vec<RowIssue>,
}

/// Where the rows come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    Csv(PathBuf),
    Sheet {
        sheet_id: Option<String>,
        range: Option<String>,
    },
}

/// Row order in the terminal report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Keep source order.
    Input,
    /// Soonest payment first; terminal rows last.
    NextDate,
}

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Fully resolved run configuration.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: SourceSpec,
    /// Evaluation date; `None` means "today" captured once at the start of the run.
    pub as_of: Option<NaiveDate>,
    pub timeout_secs: u64,
    pub sort: SortOrder,
    pub export: Option<(PathBuf, ExportFormat)>,
}
