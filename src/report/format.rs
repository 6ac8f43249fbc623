//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the calculation code stays clean and testable
//! - output changes are localized

use chrono::NaiveDate;

use crate::domain::{Column, ComputedRow};
use crate::report::Summary;

/// Format the run header (source, as-of, counts, totals).
pub fn format_run_summary(source: &str, as_of: NaiveDate, summary: &Summary, missing_columns: &[Column]) -> String {
    let mut out = String::new();

    out.push_str("=== isched - Next Interest Payments ===\n");
    out.push_str(&format!("Source: {source}\n"));
    out.push_str(&format!("As-of: {}\n", as_of.format("%Y-%m-%d")));
    out.push_str(&format!(
        "Rows: n={} | due={} | term ended={} | invalid={}\n",
        summary.rows, summary.due, summary.term_ended, summary.invalid
    ));
    out.push_str(&format!("Total interest due: {:.2}\n", summary.total_interest_due));
    if let Some(date) = summary.earliest_due {
        out.push_str(&format!("Earliest payment: {}\n", date.format("%Y-%m-%d")));
    }
    if !missing_columns.is_empty() {
        let names: Vec<&str> = missing_columns.iter().map(|c| c.header()).collect();
        out.push_str(&format!("Missing columns (treated as empty): {}\n", names.join(", ")));
    }

    out
}

/// Format the per-row table.
pub fn format_table(rows: &[&ComputedRow]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>5} {:<18} {:<10} {:>5} {:>8} {:>14} {:<12} {:>8} {:<12} {:>12}",
            "line", "bank", "start", "term", "rate", "principal", "frequency", "interval", "next", "interest"
        )
        .trim_end(),
    );
    out.push('\n');

    out.push_str(
        format!(
            "{:-<5} {:-<18} {:-<10} {:-<5} {:-<8} {:-<14} {:-<12} {:-<8} {:-<12} {:-<12}",
            "", "", "", "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for r in rows {
        let d = &r.display;
        out.push_str(
            format!(
                "{:>5} {:<18} {:<10} {:>5} {:>8} {:>14} {:<12} {:>8} {:<12} {:>12}",
                r.line,
                truncate(&d.bank, 18),
                d.start_date,
                d.term,
                d.interest_rate,
                d.principal,
                truncate(&d.frequency, 12),
                d.interval,
                d.next_payment,
                d.interest_amount,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format per-row warnings; empty when every cell was usable.
pub fn format_row_issues(rows: &[ComputedRow]) -> String {
    let mut out = String::new();
    for r in rows.iter().filter(|r| !r.issues.is_empty()) {
        let issues: Vec<String> = r.issues.iter().map(ToString::to_string).collect();
        out.push_str(&format!("  line {}: {}\n", r.line, issues.join("; ")));
    }
    if out.is_empty() {
        return out;
    }
    format!("Row warnings:\n{out}")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
