//! Presentation strings for normalized and derived fields.
//!
//! Typed values are never touched; every input state (including absent) maps to
//! a defined string.

use chrono::NaiveDate;

use crate::domain::{DisplayRow, Record, Schedule};

/// Placeholder for absent values.
pub const PLACEHOLDER: &str = "N/A";

/// Build the display strings for one row.
pub fn display_row(record: &Record, schedule: &Schedule) -> DisplayRow {
    DisplayRow {
        start_date: fmt_date(record.start_date),
        term: fmt_whole(record.term_months),
        interest_rate: fmt_2dp(record.interest_rate_annual_percent),
        principal: fmt_2dp(record.principal),
        frequency: fmt_text(record.frequency_label.as_deref()),
        bank: fmt_text(record.bank_label.as_deref()),
        interval: fmt_whole(schedule.interval_months),
        next_payment: schedule.next_payment.to_string(),
        interest_amount: fmt_amount(schedule.interest_amount),
    }
}

pub fn fmt_date(value: Option<NaiveDate>) -> String {
    value.map_or_else(placeholder, |d| d.format("%Y-%m-%d").to_string())
}

/// Integer rendering (truncates toward zero).
pub fn fmt_whole(value: Option<f64>) -> String {
    value.map_or_else(placeholder, |v| format!("{}", v.trunc() as i64))
}

pub fn fmt_2dp(value: Option<f64>) -> String {
    value.map_or_else(placeholder, |v| format!("{v:.2}"))
}

/// The interest amount always has a value.
pub fn fmt_amount(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{value:.2}")
}

pub fn fmt_text(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(placeholder, str::to_string)
}

fn placeholder() -> String {
    PLACEHOLDER.to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::NextPayment;

    #[test]
    fn absent_record_renders_placeholders() {
        let schedule = Schedule {
            interval_months: None,
            next_payment: NextPayment::InvalidData,
            interest_amount: 0.0,
        };
        let row = display_row(&Record::default(), &schedule);
        assert_eq!(
            row,
            DisplayRow {
                start_date: "N/A".to_string(),
                term: "N/A".to_string(),
                interest_rate: "N/A".to_string(),
                principal: "N/A".to_string(),
                frequency: "N/A".to_string(),
                bank: "N/A".to_string(),
                interval: "N/A".to_string(),
                next_payment: "Invalid Data".to_string(),
                interest_amount: "0.00".to_string(),
            }
        );
    }

    #[test]
    fn values_are_rounded_for_display_only() {
        let record = Record {
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1),
            term_months: Some(6.0),
            interest_rate_annual_percent: Some(4.125),
            principal: Some(12_345.678),
            frequency_label: Some("End of Term".to_string()),
            bank_label: Some(" Harbor Savings ".to_string()),
        };
        let schedule = Schedule {
            interval_months: Some(6.0),
            next_payment: NextPayment::Due(NaiveDate::from_ymd_opt(2023, 7, 1).unwrap()),
            interest_amount: 254.6296,
        };
        let row = display_row(&record, &schedule);
        assert_eq!(row.start_date, "2023-01-01");
        assert_eq!(row.term, "6");
        assert_eq!(row.principal, "12345.68");
        assert_eq!(row.bank, "Harbor Savings");
        assert_eq!(row.interval, "6");
        assert_eq!(row.next_payment, "2023-07-01");
        assert_eq!(row.interest_amount, "254.63");
        assert_eq!(record.principal, Some(12_345.678));
    }

    #[test]
    fn whole_numbers_truncate() {
        assert_eq!(fmt_whole(Some(6.9)), "6");
        assert_eq!(fmt_whole(Some(0.0)), "0");
        assert_eq!(fmt_amount(f64::NAN), "0.00");
        assert_eq!(fmt_text(Some("   ")), "N/A");
    }
}
