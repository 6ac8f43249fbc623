//! The per-row calculation core.
//!
//! Responsibilities:
//!
//! - normalize raw cells into a typed record
//! - resolve the payment interval from the frequency label
//! - project the next payment date (or a terminal status)
//! - compute the interest due at that payment
//!
//! Every function here is pure: the evaluation date is always passed in.

pub mod interest;
pub mod interval;
pub mod normalize;
pub mod scheduler;

pub use interest::*;
pub use interval::*;
pub use normalize::*;
pub use scheduler::*;

use chrono::NaiveDate;

use crate::domain::{ComputedRow, RawRow, Record, Schedule};

/// Derive the schedule for an already-normalized record.
pub fn compute_schedule(record: &Record, as_of: NaiveDate) -> Schedule {
    let interval_months = resolve_interval(record.frequency_label.as_deref(), record.term_months);
    let next_payment = next_payment(record.start_date, record.term_months, interval_months, as_of);
    let interest_amount = interest_due(
        next_payment,
        record.principal,
        record.interest_rate_annual_percent,
        interval_months,
    );

    Schedule {
        interval_months,
        next_payment,
        interest_amount,
    }
}

/// Run the full per-row pipeline.
pub fn evaluate_row(row: &RawRow, as_of: NaiveDate) -> ComputedRow {
    let Normalized { record, issues } = normalize_row(row);
    let schedule = compute_schedule(&record, as_of);
    let display = crate::report::display_row(&record, &schedule);

    ComputedRow {
        line: row.line,
        record,
        schedule,
        display,
        issues,
    }
}
