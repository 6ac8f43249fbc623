//! Command-line parsing for the interest schedule tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! calculation code. Flags are resolved into a `RunConfig` in `app`.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::{ExportFormat, SortOrder};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "isched", version, about = "Next interest payment dates and amounts for a deposit/loan sheet")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the schedule table for every row.
    Show(ShowArgs),
    /// Write the computed rows to a CSV or JSON file.
    Export(ExportArgs),
}

/// Where to read rows from and which date to evaluate against.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// Read rows from a local CSV export instead of Google Sheets.
    #[arg(short = 'f', long, value_name = "CSV", conflicts_with = "sheet_id")]
    pub csv: Option<PathBuf>,

    /// Google Sheet id (defaults to SHEET_ID from the environment).
    #[arg(long)]
    pub sheet_id: Option<String>,

    /// A1 range to read (defaults to SHEET_RANGE, then `Sheet1!A:M`).
    #[arg(long)]
    pub range: Option<String>,

    /// Evaluate as of this date (YYYY-MM-DD) instead of today.
    #[arg(long, value_name = "DATE", value_parser = parse_as_of)]
    pub as_of: Option<NaiveDate>,

    /// HTTP timeout for the Sheets API, in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Row order in the table.
    #[arg(long, value_enum, default_value_t = SortOrder::Input)]
    pub sort: SortOrder,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output file.
    #[arg(short, long, value_name = "PATH")]
    pub out: PathBuf,

    /// Output format (defaults to the file extension, else CSV).
    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,
}

fn parse_as_of(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD ({e})"))
}
