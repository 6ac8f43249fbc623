//! Reporting utilities: display strings, batch summary, and terminal output.

pub mod display;
pub mod format;

pub use display::*;
pub use format::*;

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{ComputedRow, NextPayment, SortOrder};

/// Counts and totals over one computed batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub rows: usize,
    pub due: usize,
    pub term_ended: usize,
    pub invalid: usize,
    pub rows_with_issues: usize,
    /// Sum of interest due at each row's next payment.
    pub total_interest_due: f64,
    pub earliest_due: Option<NaiveDate>,
}

pub fn summarize(rows: &[ComputedRow]) -> Summary {
    let mut summary = Summary {
        rows: rows.len(),
        due: 0,
        term_ended: 0,
        invalid: 0,
        rows_with_issues: 0,
        total_interest_due: 0.0,
        earliest_due: None,
    };

    for row in rows {
        match row.schedule.next_payment {
            NextPayment::Due(date) => {
                summary.due += 1;
                summary.earliest_due = Some(summary.earliest_due.map_or(date, |d| d.min(date)));
            }
            NextPayment::TermEnded => summary.term_ended += 1,
            NextPayment::InvalidData => summary.invalid += 1,
        }
        if !row.issues.is_empty() {
            summary.rows_with_issues += 1;
        }
        summary.total_interest_due += row.schedule.interest_amount;
    }

    summary
}

/// Order rows for presentation. The sort is stable.
pub fn sort_rows(rows: &[ComputedRow], order: SortOrder) -> Vec<&ComputedRow> {
    let mut out: Vec<&ComputedRow> = rows.iter().collect();
    if order == SortOrder::NextDate {
        out.sort_by(|a, b| compare_next_payment(a.schedule.next_payment, b.schedule.next_payment));
    }
    out
}

fn compare_next_payment(a: NextPayment, b: NextPayment) -> Ordering {
    fn rank(p: NextPayment) -> u8 {
        match p {
            NextPayment::Due(_) => 0,
            NextPayment::TermEnded => 1,
            NextPayment::InvalidData => 2,
        }
    }
    match (a, b) {
        (NextPayment::Due(x), NextPayment::Due(y)) => x.cmp(&y),
        _ => rank(a).cmp(&rank(b)),
    }
}
