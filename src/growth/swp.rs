//! Systematic withdrawal plan
//!
//! The corpus earns the monthly return, then the withdrawal is taken at month end.
//! A corpus that runs dry pays out what is left and the plan stops there.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{check, EngineResult};
use crate::rates::monthly_rate;

/// Balances below this share of the withdrawal count as depleted
const DEPLETION_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwpInput {
    pub initial_corpus: f64,
    pub monthly_withdrawal: f64,
    pub annual_return_rate_percent: f64,
    pub period_months: u32,
}

impl SwpInput {
    pub fn validate(&self) -> EngineResult<()> {
        check::positive("initial_corpus", self.initial_corpus)?;
        check::positive("monthly_withdrawal", self.monthly_withdrawal)?;
        check::non_negative("annual_return_rate_percent", self.annual_return_rate_percent)?;
        check::at_least_one_month("period_months", self.period_months)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwpResult {
    pub total_withdrawn: f64,
    pub final_balance: f64,

    /// Months in which a withdrawal (possibly partial) was paid
    pub months_funded: u32,

    /// Corpus ran out before the end of the period
    pub exhausted: bool,
}

pub fn systematic_withdrawal(input: &SwpInput) -> EngineResult<SwpResult> {
    input.validate()?;

    let i = monthly_rate(input.annual_return_rate_percent);
    // Balance left after rounding drift, not real money
    let dust = input.monthly_withdrawal * DEPLETION_TOLERANCE;
    let mut balance = input.initial_corpus;
    let mut total_withdrawn = 0.0;
    let mut months_funded = 0;
    let mut exhausted = false;

    for _month in 1..=input.period_months {
        balance = check::finite_output("systematic_withdrawal", balance + balance * i)?;

        let withdrawal = input.monthly_withdrawal.min(balance);
        balance -= withdrawal;
        total_withdrawn += withdrawal;
        months_funded += 1;

        if balance <= dust {
            balance = 0.0;
            exhausted = months_funded < input.period_months
                || withdrawal < input.monthly_withdrawal - dust;
            break;
        }
    }

    if exhausted {
        warn!(
            "swp: corpus {:.2} exhausted after {} of {} months",
            input.initial_corpus, months_funded, input.period_months
        );
    }
    debug!(
        "swp: withdrawn={:.2} final_balance={:.2}",
        total_withdrawn, balance
    );

    Ok(SwpResult {
        total_withdrawn,
        final_balance: balance,
        months_funded,
        exhausted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::present_value_of_annuity;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_rate_drawdown() {
        let result = systematic_withdrawal(&SwpInput {
            initial_corpus: 12_000.0,
            monthly_withdrawal: 1000.0,
            annual_return_rate_percent: 0.0,
            period_months: 6,
        })
        .unwrap();

        assert_eq!(result.total_withdrawn, 6000.0);
        assert_eq!(result.final_balance, 6000.0);
        assert_eq!(result.months_funded, 6);
        assert!(!result.exhausted);
    }

    #[test]
    fn test_interest_only_withdrawal_preserves_corpus() {
        let result = systematic_withdrawal(&SwpInput {
            initial_corpus: 1_000_000.0,
            monthly_withdrawal: 10_000.0,
            annual_return_rate_percent: 12.0,
            period_months: 120,
        })
        .unwrap();

        assert_relative_eq!(result.final_balance, 1_000_000.0, max_relative = 1e-9);
        assert_relative_eq!(result.total_withdrawn, 1_200_000.0);
    }

    #[test]
    fn test_corpus_exhaustion() {
        let result = systematic_withdrawal(&SwpInput {
            initial_corpus: 2500.0,
            monthly_withdrawal: 1000.0,
            annual_return_rate_percent: 0.0,
            period_months: 12,
        })
        .unwrap();

        assert!(result.exhausted);
        assert_eq!(result.months_funded, 3);
        assert_eq!(result.total_withdrawn, 2500.0);
        assert_eq!(result.final_balance, 0.0);
    }

    #[test]
    fn test_exact_depletion_on_last_month_is_not_exhaustion() {
        let result = systematic_withdrawal(&SwpInput {
            initial_corpus: 3000.0,
            monthly_withdrawal: 1000.0,
            annual_return_rate_percent: 0.0,
            period_months: 3,
        })
        .unwrap();
        assert!(!result.exhausted);
        assert_eq!(result.final_balance, 0.0);
    }

    #[test]
    fn test_corpus_matching_present_value_funds_exact_months() {
        let corpus = present_value_of_annuity(1000.0, 0.01, 60.0).unwrap();
        let result = systematic_withdrawal(&SwpInput {
            initial_corpus: corpus,
            monthly_withdrawal: 1000.0,
            annual_return_rate_percent: 12.0,
            period_months: 240,
        })
        .unwrap();

        assert_eq!(result.months_funded, 60);
        assert!(result.exhausted);
        assert_eq!(result.final_balance, 0.0);
        assert_relative_eq!(result.total_withdrawn, 60_000.0, max_relative = 1e-9);
    }

    #[test]
    fn test_corpus_matching_present_value_over_its_own_term_is_not_exhausted() {
        let corpus = present_value_of_annuity(2500.0, 0.005, 120.0).unwrap();
        let result = systematic_withdrawal(&SwpInput {
            initial_corpus: corpus,
            monthly_withdrawal: 2500.0,
            annual_return_rate_percent: 6.0,
            period_months: 120,
        })
        .unwrap();

        assert_eq!(result.months_funded, 120);
        assert!(!result.exhausted);
    }

    #[test]
    fn test_runaway_growth_is_a_domain_error() {
        let err = systematic_withdrawal(&SwpInput {
            initial_corpus: 1e300,
            monthly_withdrawal: 1.0,
            annual_return_rate_percent: 1200.0,
            period_months: 1200,
        })
        .unwrap_err();
        assert!(err.is_domain_error());
    }

    #[test]
    fn test_validation() {
        let err = systematic_withdrawal(&SwpInput {
            initial_corpus: 1000.0,
            monthly_withdrawal: 0.0,
            annual_return_rate_percent: 8.0,
            period_months: 12,
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("monthly_withdrawal"));
    }
}
