//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - resolves a `RunConfig`
//! - runs the batch pipeline
//! - prints the report or writes the export

use std::path::Path;

use clap::Parser;
use tracing::Level;

use crate::cli::{Command, ExportArgs, ShowArgs, SourceArgs};
use crate::domain::{ExportFormat, RunConfig, SortOrder, SourceSpec};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `isched` binary.
pub fn run() -> Result<(), AppError> {
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    init_logging(cli.verbose);

    match cli.command {
        Command::Show(args) => handle_show(args),
        Command::Export(args) => handle_export(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    // Logs go to stderr so the report on stdout stays pipeable.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let config = run_config(&args.source, args.sort, None);
    let batch = pipeline::run_batch(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&batch.source, batch.as_of, &batch.summary, &batch.missing_columns)
    );
    let rows = crate::report::sort_rows(&batch.rows, config.sort);
    print!("{}", crate::report::format_table(&rows));

    let issues = crate::report::format_row_issues(&batch.rows);
    if !issues.is_empty() {
        print!("\n{issues}");
    }
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let format = args.format.unwrap_or_else(|| format_from_extension(&args.out));
    let config = run_config(&args.source, SortOrder::Input, Some((args.out.clone(), format)));
    let batch = pipeline::run_batch(&config)?;

    if let Some((path, format)) = &config.export {
        crate::io::write_export(path, *format, batch.as_of, &batch.summary, &batch.rows)?;
        tracing::info!(path = %path.display(), rows = batch.rows.len(), "export written");
        println!("Wrote {} row(s) to {}", batch.rows.len(), path.display());
    }
    Ok(())
}

pub fn run_config(
    source: &SourceArgs,
    sort: SortOrder,
    export: Option<(std::path::PathBuf, ExportFormat)>,
) -> RunConfig {
    let spec = match &source.csv {
        Some(path) => SourceSpec::Csv(path.clone()),
        None => SourceSpec::Sheet {
            sheet_id: source.sheet_id.clone(),
            range: source.range.clone(),
        },
    };

    RunConfig {
        source: spec,
        as_of: source.as_of,
        timeout_secs: source.timeout_secs,
        sort,
        export,
    }
}

fn format_from_extension(path: &Path) -> ExportFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
        _ => ExportFormat::Csv,
    }
}

/// Rewrite argv so `isched` defaults to `isched show`.
///
/// Rules:
/// - `isched`                          -> `isched show`
/// - `isched -f rows.csv ...`          -> `isched show -f rows.csv ...`
/// - `isched --help/--version/-h`      -> unchanged (show top-level help/version)
/// - `isched -v ...`                   -> unchanged unless no subcommand follows
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(first) = argv.iter().skip(1).position(|a| !is_verbosity_flag(a)).map(|i| i + 1) else {
        argv.push("show".to_string());
        return argv;
    };
    let arg = argv[first].as_str();

    let is_top_level_help_or_version = matches!(arg, "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg, "show" | "export");
    if is_subcommand {
        return argv;
    }

    // A flag in first position is treated as "show flags".
    if arg.starts_with('-') {
        argv.insert(first, "show".to_string());
        return argv;
    }

    argv
}

fn is_verbosity_flag(arg: &str) -> bool {
    arg == "--verbose" || (arg.len() > 1 && arg.starts_with('-') && !arg.starts_with("--") && arg[1..].chars().all(|c| c == 'v'))
}
