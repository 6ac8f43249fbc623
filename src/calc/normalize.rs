//! Row normalization.
//!
//! Turns one untyped `RawRow` into a typed `Record`. Bad cells never fail the
//! row: the field becomes absent and the cell is reported as a `RowIssue`.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{Column, RawRow, Record, RowIssue};

/// A normalized record plus the cells that could not be used.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub record: Record,
    pub issues: Vec<RowIssue>,
}

/// Normalize one raw row.
pub fn normalize_row(row: &RawRow) -> Normalized {
    let mut issues = Vec::new();

    let start_date = typed_cell(row, Column::StartDate, parse_date, &mut issues);
    let term_months = typed_cell(row, Column::Term, parse_non_negative, &mut issues);
    let interest_rate_annual_percent = typed_cell(row, Column::InterestRate, parse_non_negative, &mut issues);
    let principal = typed_cell(row, Column::Principal, parse_non_negative, &mut issues);

    Normalized {
        record: Record {
            start_date,
            term_months,
            interest_rate_annual_percent,
            principal,
            frequency_label: text_cell(row, Column::Frequency),
            bank_label: text_cell(row, Column::Bank),
        },
        issues,
    }
}

fn typed_cell<T>(
    row: &RawRow,
    column: Column,
    parse: fn(&str) -> Option<T>,
    issues: &mut Vec<RowIssue>,
) -> Option<T> {
    let raw = text_cell(row, column)?;
    let value = parse(&raw);
    if value.is_none() {
        issues.push(RowIssue { column, raw });
    }
    value
}

fn text_cell(row: &RawRow, column: Column) -> Option<String> {
    row.get(column)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse a calendar date.
///
/// ISO dates are preferred, but sheets are edited by hand and often carry
/// US-style or long-form dates. The order below is deterministic: ambiguous
/// slash dates are read month-first.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    const DATE_FMTS: [&str; 6] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y", "%d %b %Y", "%B %d, %Y"];
    const DATETIME_FMTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    let s = s.trim();
    DATE_FMTS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FMTS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Parse a finite number, tolerating spreadsheet formatting
/// (`$10,000.00`, `5.5%`).
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_suffix('%').unwrap_or(s).trim_end();
    let s = s.trim_start_matches(['$', '€', '£']).trim_start();
    let cleaned: String = s.chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    let v = cleaned.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

fn parse_non_negative(s: &str) -> Option<f64> {
    parse_number(s).filter(|v| *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn row(cells: &[(&str, &str)]) -> RawRow {
        RawRow {
            line: 2,
            cells: cells
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn full_row_normalizes() {
        let out = normalize_row(&row(&[
            ("Start Date", "2023-01-15"),
            ("Term", "12"),
            ("Interest Rate", "6"),
            ("Principal", "10000"),
            ("Frequency", " Monthly "),
            ("Bank", "  First Bank "),
        ]));

        assert_eq!(
            out.record,
            Record {
                start_date: NaiveDate::from_ymd_opt(2023, 1, 15),
                term_months: Some(12.0),
                interest_rate_annual_percent: Some(6.0),
                principal: Some(10000.0),
                frequency_label: Some("Monthly".to_string()),
                bank_label: Some("First Bank".to_string()),
            }
        );
        assert!(out.issues.is_empty());
    }

    #[test]
    fn missing_columns_are_absent_without_issues() {
        let out = normalize_row(&row(&[("Term", "6")]));
        assert_eq!(
            out.record,
            Record {
                term_months: Some(6.0),
                ..Record::default()
            }
        );
        assert!(out.issues.is_empty());
    }

    #[test]
    fn bad_cells_become_absent_and_are_reported() {
        let out = normalize_row(&row(&[
            ("Start Date", "next tuesday"),
            ("Term", "twelve"),
            ("Interest Rate", "-1.5"),
            ("Principal", "NaN"),
            ("Frequency", "   "),
        ]));

        assert_eq!(out.record, Record::default());
        let columns: Vec<Column> = out.issues.iter().map(|i| i.column).collect();
        assert_eq!(
            columns,
            vec![Column::StartDate, Column::Term, Column::InterestRate, Column::Principal]
        );
        assert_eq!(out.issues[1].raw, "twelve");
    }

    #[test]
    fn date_formats() {
        let d = NaiveDate::from_ymd_opt(2023, 1, 15);
        assert_eq!(parse_date("2023-01-15"), d);
        assert_eq!(parse_date("2023/01/15"), d);
        assert_eq!(parse_date("1/15/2023"), d);
        assert_eq!(parse_date("15-01-2023"), d);
        assert_eq!(parse_date("15 Jan 2023"), d);
        assert_eq!(parse_date("January 15, 2023"), d);
        assert_eq!(parse_date("2023-01-15 00:00:00"), d);
        assert_eq!(parse_date("2023-01-15T09:30:00"), d);
        assert_eq!(parse_date("2023-02-30"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn number_formats() {
        assert_eq!(parse_number("10000"), Some(10000.0));
        assert_eq!(parse_number("$10,000.50"), Some(10000.5));
        assert_eq!(parse_number("5.25%"), Some(5.25));
        assert_eq!(parse_number(" 3 "), Some(3.0));
        assert_eq!(parse_number("-2"), Some(-2.0));
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("%"), None);
        assert_eq!(parse_number("1.2.3"), None);
    }
}
