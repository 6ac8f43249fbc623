//! Next-payment projection.
//!
//! Payments fall on `start + k * interval` months. Month counting uses only the
//! year/month of `as_of`, never elapsed days, and the day-of-month of the start
//! date is kept (clamped to the last day of short months).

use chrono::{Datelike, Months, NaiveDate};

use crate::domain::NextPayment;

/// Project the next payment strictly after the current month offset from `start`.
pub fn next_payment(
    start_date: Option<NaiveDate>,
    term_months: Option<f64>,
    interval_months: Option<f64>,
    as_of: NaiveDate,
) -> NextPayment {
    let (Some(start), Some(term), Some(interval)) = (start_date, term_months, interval_months) else {
        return NextPayment::InvalidData;
    };
    let (Some(term), Some(interval)) = (whole_months(term), whole_months(interval)) else {
        return NextPayment::InvalidData;
    };
    if interval == 0 {
        return NextPayment::InvalidData;
    }

    let since = months_since(start, as_of);
    let interval = i64::from(interval);
    let next_multiple = (since.div_euclid(interval) + 1) * interval;

    let Some(candidate) = add_months(start, next_multiple) else {
        return NextPayment::InvalidData;
    };
    // An end date past the calendar's range is later than any candidate.
    let term_ended = add_months(start, i64::from(term)).is_some_and(|end| candidate > end);

    if term_ended {
        NextPayment::TermEnded
    } else {
        NextPayment::Due(candidate)
    }
}

/// Whole-month difference between two dates, ignoring the day of month.
pub fn months_since(start: NaiveDate, as_of: NaiveDate) -> i64 {
    (i64::from(as_of.year()) - i64::from(start.year())) * 12 + (i64::from(as_of.month()) - i64::from(start.month()))
}

/// Calendar month shift with end-of-month clamping (Jan 31 + 1 month = Feb 28/29).
///
/// Negative offsets move backwards.
pub fn add_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let step = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months < 0 {
        date.checked_sub_months(step)
    } else {
        date.checked_add_months(step)
    }
}

fn whole_months(value: f64) -> Option<u32> {
    let valid = value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX);
    valid.then(|| value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn monthly_row_after_term_has_ended() {
        let out = next_payment(Some(d(2023, 1, 15)), Some(12.0), Some(1.0), d(2024, 3, 10));
        assert_eq!(out, NextPayment::TermEnded);
    }

    #[test]
    fn monthly_row_within_term() {
        let out = next_payment(Some(d(2023, 1, 15)), Some(12.0), Some(1.0), d(2023, 5, 10));
        assert_eq!(out, NextPayment::Due(d(2023, 6, 15)));
    }

    #[test]
    fn end_of_term_payment_lands_on_the_end_date() {
        let out = next_payment(Some(d(2023, 1, 1)), Some(6.0), Some(6.0), d(2023, 2, 1));
        assert_eq!(out, NextPayment::Due(d(2023, 7, 1)));
    }

    #[test]
    fn day_of_month_is_ignored_when_counting_months() {
        // Payment day (31st) not yet reached on the 5th, but the month counts as reached.
        let out = next_payment(Some(d(2023, 1, 31)), Some(24.0), Some(1.0), d(2023, 3, 5));
        assert_eq!(out, NextPayment::Due(d(2023, 4, 30)));
    }

    #[test]
    fn month_end_is_clamped() {
        assert_eq!(add_months(d(2023, 1, 31), 1), Some(d(2023, 2, 28)));
        assert_eq!(add_months(d(2024, 1, 31), 1), Some(d(2024, 2, 29)));
        assert_eq!(add_months(d(2023, 1, 31), 2), Some(d(2023, 3, 31)));
        assert_eq!(add_months(d(2023, 3, 31), -1), Some(d(2023, 2, 28)));
        assert_eq!(add_months(d(2023, 1, 15), -13), Some(d(2021, 12, 15)));
        assert_eq!(add_months(d(2023, 1, 15), i64::MIN), None);

        let out = next_payment(Some(d(2023, 1, 31)), Some(12.0), Some(1.0), d(2023, 1, 10));
        assert_eq!(out, NextPayment::Due(d(2023, 2, 28)));
    }

    #[test]
    fn quarterly_steps_skip_to_the_next_multiple() {
        let out = next_payment(Some(d(2023, 1, 15)), Some(24.0), Some(3.0), d(2023, 4, 20));
        assert_eq!(out, NextPayment::Due(d(2023, 7, 15)));
    }

    #[test]
    fn future_start_uses_the_next_multiple_of_the_offset() {
        // Two months before start: next multiple of 1 above -2 is -1.
        let out = next_payment(Some(d(2024, 5, 15)), Some(12.0), Some(1.0), d(2024, 3, 10));
        assert_eq!(out, NextPayment::Due(d(2024, 4, 15)));

        // Next multiple of 3 above -2 is 0: the start date itself.
        let out = next_payment(Some(d(2024, 5, 15)), Some(12.0), Some(3.0), d(2024, 3, 10));
        assert_eq!(out, NextPayment::Due(d(2024, 5, 15)));
    }

    #[test]
    fn end_date_beyond_the_calendar_does_not_invalidate_the_row() {
        let out = next_payment(Some(d(2023, 1, 15)), Some(4_000_000.0), Some(1.0), d(2023, 5, 10));
        assert_eq!(out, NextPayment::Due(d(2023, 6, 15)));
    }

    #[test]
    fn zero_term_ends_immediately() {
        let out = next_payment(Some(d(2023, 1, 15)), Some(0.0), Some(1.0), d(2023, 1, 20));
        assert_eq!(out, NextPayment::TermEnded);
    }

    #[test]
    fn absent_or_impossible_inputs_are_invalid() {
        let as_of = d(2023, 5, 1);
        let start = Some(d(2023, 1, 1));
        assert_eq!(next_payment(None, Some(12.0), Some(1.0), as_of), NextPayment::InvalidData);
        assert_eq!(next_payment(start, None, Some(1.0), as_of), NextPayment::InvalidData);
        assert_eq!(next_payment(start, Some(12.0), None, as_of), NextPayment::InvalidData);
        assert_eq!(next_payment(start, Some(12.0), Some(0.0), as_of), NextPayment::InvalidData);
        assert_eq!(next_payment(start, Some(12.0), Some(-3.0), as_of), NextPayment::InvalidData);
        assert_eq!(next_payment(start, Some(6.5), Some(1.0), as_of), NextPayment::InvalidData);
        assert_eq!(next_payment(start, Some(6.5), Some(6.5), as_of), NextPayment::InvalidData);
        assert_eq!(next_payment(start, Some(f64::NAN), Some(1.0), as_of), NextPayment::InvalidData);
    }

    #[test]
    fn due_date_is_always_past_the_current_month_offset() {
        let start = d(2022, 8, 31);
        for interval in [1.0, 3.0, 7.0] {
            for offset in 0..60 {
                let as_of = add_months(d(2022, 1, 28), offset).unwrap();
                let since = months_since(start, as_of);
                if let NextPayment::Due(date) = next_payment(Some(start), Some(48.0), Some(interval), as_of) {
                    assert!(months_since(start, date) > since, "interval={interval} as_of={as_of}");
                    assert!(date <= add_months(start, 48).unwrap());
                }
            }
        }
    }

    #[test]
    fn same_inputs_same_answer() {
        let args = (Some(d(2023, 3, 31)), Some(18.0), Some(3.0), d(2023, 11, 2));
        let a = next_payment(args.0, args.1, args.2, args.3);
        let b = next_payment(args.0, args.1, args.2, args.3);
        assert_eq!(a, b);
    }
}
