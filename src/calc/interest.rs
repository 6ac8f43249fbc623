//! Simple (non-compounding) interest due at the next payment.

use crate::domain::NextPayment;

/// `principal * rate/100 * interval/12`, or 0 when nothing is due.
///
/// No rounding here; rounding is a display concern.
pub fn interest_due(
    next_payment: NextPayment,
    principal: Option<f64>,
    interest_rate_annual_percent: Option<f64>,
    interval_months: Option<f64>,
) -> f64 {
    let NextPayment::Due(_) = next_payment else {
        return 0.0;
    };
    match (principal, interest_rate_annual_percent, interval_months) {
        (Some(principal), Some(rate), Some(interval)) => principal * (rate / 100.0) * (interval / 12.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn due() -> NextPayment {
        NextPayment::Due(NaiveDate::from_ymd_opt(2023, 6, 15).unwrap())
    }

    #[test]
    fn monthly_interest_is_a_twelfth_of_annual() {
        let amount = interest_due(due(), Some(10_000.0), Some(6.0), Some(1.0));
        assert!((amount - 50.0).abs() < 1e-9);
    }

    #[test]
    fn end_of_term_interest_prorates_over_the_term() {
        let amount = interest_due(due(), Some(20_000.0), Some(4.5), Some(6.0));
        assert!((amount - 450.0).abs() < 1e-9);
    }

    #[test]
    fn terminal_schedules_pay_nothing() {
        assert_eq!(interest_due(NextPayment::TermEnded, Some(10_000.0), Some(6.0), Some(1.0)), 0.0);
        assert_eq!(interest_due(NextPayment::InvalidData, Some(10_000.0), Some(6.0), Some(1.0)), 0.0);
    }

    #[test]
    fn missing_amounts_pay_nothing() {
        assert_eq!(interest_due(due(), None, Some(6.0), Some(1.0)), 0.0);
        assert_eq!(interest_due(due(), Some(10_000.0), None, Some(1.0)), 0.0);
    }
}
