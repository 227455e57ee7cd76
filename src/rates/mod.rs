//! Rate conversions and annuity primitives shared by every calculator
//!
//! All higher-level calculators go through these functions so that the
//! zero-rate branches and the rounding behaviour are identical everywhere.

mod annuity;

pub use annuity::{
    compound_factor, emi_for_annuity, future_value_of_annuity_due, present_value_of_annuity,
    tenure_from_emi,
};

/// Months per year; every computation in the engine compounds monthly
pub const MONTHS_PER_YEAR: u32 = 12;

/// Convert an annual nominal rate in percent to a monthly decimal rate
///
/// `12.0` (12% p.a.) becomes `0.01`.
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / (MONTHS_PER_YEAR as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(12.0), 0.01);
        assert_eq!(monthly_rate(0.0), 0.0);
        assert!((monthly_rate(8.5) - 0.0070833333).abs() < 1e-9);
    }
}
