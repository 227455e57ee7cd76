//! EMI computation for a standard reducing-balance loan

use log::debug;
use serde::{Deserialize, Serialize};

use super::schedule::Schedule;
use super::terms::LoanTerms;
use crate::error::{check, EngineResult};
use crate::rates::emi_for_annuity;

/// Result of amortizing a loan
///
/// The schedule is not stored; [`AmortizationResult::schedule`] produces it on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub terms: LoanTerms,

    /// Monthly decimal rate used for every row
    pub monthly_rate: f64,

    /// Equated monthly installment
    pub emi: f64,

    /// `emi × tenure_months`
    pub total_payment: f64,

    /// `total_payment − principal`
    pub total_interest: f64,
}

impl AmortizationResult {
    /// Fresh month-by-month schedule for these terms
    pub fn schedule(&self) -> Schedule {
        Schedule::new(
            self.terms.principal,
            self.emi,
            self.monthly_rate,
            self.terms.tenure_months,
        )
    }

    pub fn summary(&self) -> AmortizationSummary {
        AmortizationSummary {
            principal: self.terms.principal,
            emi: self.emi,
            tenure_months: self.terms.tenure_months,
            total_interest: self.total_interest,
            total_payment: self.total_payment,
        }
    }
}

/// Headline figures of a loan, used wherever two loans are compared
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSummary {
    pub principal: f64,
    pub emi: f64,
    pub tenure_months: u32,
    pub total_interest: f64,
    pub total_payment: f64,
}

/// Compute the EMI and totals for `terms`
pub fn amortize(terms: &LoanTerms) -> EngineResult<AmortizationResult> {
    terms.validate()?;

    let i = terms.monthly_rate();
    let emi = emi_for_annuity(terms.principal, i, terms.tenure_months as f64)?;
    let total_payment = check::finite_output("amortize", emi * terms.tenure_months as f64)?;
    let total_interest = total_payment - terms.principal;

    debug!(
        "amortize: principal={:.2} rate={}% tenure={} -> emi={:.4} interest={:.4}",
        terms.principal, terms.annual_rate_percent, terms.tenure_months, emi, total_interest
    );

    Ok(AmortizationResult {
        terms: *terms,
        monthly_rate: i,
        emi,
        total_payment,
        total_interest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_zero_rate_emi_is_exact() {
        let result = amortize(&LoanTerms::new(1200.0, 0.0, 12)).unwrap();
        assert_eq!(result.emi, 100.0);
        assert_eq!(result.total_payment, 1200.0);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_home_loan_headline_figures() {
        // 50 lakh at 8.5% for 20 years
        let result = amortize(&LoanTerms::new(5_000_000.0, 8.5, 240)).unwrap();
        assert_relative_eq!(result.emi, 43_391.16, epsilon = 0.01);
        assert_relative_eq!(result.total_interest, result.emi * 240.0 - 5_000_000.0);
    }

    #[test]
    fn test_schedule_rows_sum_to_emi() {
        let result = amortize(&LoanTerms::new(750_000.0, 10.5, 60)).unwrap();
        let mut count = 0;
        let mut principal_total = 0.0;
        let mut last = None;

        for row in result.schedule() {
            assert_relative_eq!(row.interest + row.principal_paid, result.emi, max_relative = 1e-9);
            assert!(row.interest >= 0.0);
            assert!(row.principal_paid >= 0.0);
            assert!(row.outstanding_after >= 0.0);
            principal_total += row.principal_paid;
            count += 1;
            last = Some(row);
        }

        assert_eq!(count, 60);
        assert_eq!(last.unwrap().outstanding_after, 0.0);
        assert_abs_diff_eq!(principal_total, 750_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_schedule_interest_matches_total() {
        let result = amortize(&LoanTerms::new(200_000.0, 12.0, 36)).unwrap();
        let interest: f64 = result.schedule().map(|r| r.interest).sum();
        assert_relative_eq!(interest, result.total_interest, max_relative = 1e-9);
    }

    #[test]
    fn test_single_month_loan() {
        let result = amortize(&LoanTerms::new(1000.0, 12.0, 1)).unwrap();
        assert_relative_eq!(result.emi, 1010.0, epsilon = 1e-9);
        let rows: Vec<_> = result.schedule().collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].principal_paid, 1000.0);
        assert_eq!(rows[0].outstanding_after, 0.0);
    }

    #[test]
    fn test_invalid_terms_rejected() {
        let err = amortize(&LoanTerms::new(-100.0, 10.0, 12)).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(amortize(&LoanTerms::new(100.0, 10.0, 0)).is_err());
    }

    #[test]
    fn test_summary_mirrors_result() {
        let result = amortize(&LoanTerms::new(100_000.0, 9.0, 48)).unwrap();
        let summary = result.summary();
        assert_eq!(summary.emi, result.emi);
        assert_eq!(summary.tenure_months, 48);
        assert_eq!(summary.principal, 100_000.0);
    }

    #[test]
    fn test_total_payment_overflow_is_domain_error() {
        let err = amortize(&LoanTerms::new(1.7e308, 12.0, 12)).unwrap_err();
        assert!(err.is_domain_error());
    }
}
