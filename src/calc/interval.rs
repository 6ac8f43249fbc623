//! Payment interval resolution.

use crate::domain::Frequency;

/// Months between payments for a frequency label.
///
/// Unknown or empty labels are not defaulted to anything: no interval means the
/// row cannot be scheduled. An interval that would not be positive (an
/// "End of Term" row with a zero term) is also absent.
pub fn resolve_interval(frequency_label: Option<&str>, term_months: Option<f64>) -> Option<f64> {
    let interval = match Frequency::from_label(frequency_label?)? {
        Frequency::Monthly => 1.0,
        Frequency::Quarterly => 3.0,
        Frequency::EndOfTerm => term_months?,
    };
    (interval.is_finite() && interval > 0.0).then_some(interval)
}
