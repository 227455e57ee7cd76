//! Revision of the interest rate on an outstanding loan

use serde::{Deserialize, Serialize};

use super::{compare, LoanChange, ScenarioResult};
use crate::error::{check, EngineResult};
use crate::rates::monthly_rate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateChangeInput {
    pub outstanding_principal: f64,
    pub current_annual_rate_percent: f64,
    pub current_emi: f64,
    pub revised_annual_rate_percent: f64,
}

impl RateChangeInput {
    pub fn validate(&self) -> EngineResult<()> {
        check::positive("outstanding_principal", self.outstanding_principal)?;
        check::positive("current_annual_rate_percent", self.current_annual_rate_percent)?;
        check::positive("current_emi", self.current_emi)?;
        check::positive("revised_annual_rate_percent", self.revised_annual_rate_percent)?;
        Ok(())
    }
}

/// Effect of a rate revision on tenure (keep EMI) and on EMI (keep tenure)
pub fn rate_change_impact(input: &RateChangeInput) -> EngineResult<ScenarioResult> {
    input.validate()?;

    compare(
        "rate_change_impact",
        LoanChange {
            principal: input.outstanding_principal,
            emi: input.current_emi,
            monthly_rate: monthly_rate(input.current_annual_rate_percent),
            new_principal: input.outstanding_principal,
            new_monthly_rate: monthly_rate(input.revised_annual_rate_percent),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::emi_for_annuity;
    use approx::assert_relative_eq;

    fn floating_loan(revised: f64) -> RateChangeInput {
        RateChangeInput {
            outstanding_principal: 3_000_000.0,
            current_annual_rate_percent: 8.5,
            current_emi: emi_for_annuity(3_000_000.0, 8.5 / 1200.0, 240.0).unwrap(),
            revised_annual_rate_percent: revised,
        }
    }

    #[test]
    fn test_rate_hike_extends_tenure_or_raises_emi() {
        let result = rate_change_impact(&floating_loan(9.25)).unwrap();
        assert!(result.keep_emi.new_tenure_months > result.keep_emi.old_tenure_months);
        assert!(result.keep_emi.new_interest > result.keep_emi.old_interest);
        assert!(result.keep_tenure.new_emi > result.keep_tenure.old_emi);
        assert!(result.emi_reduction() < 0.0);
    }

    #[test]
    fn test_rate_cut_shortens_tenure_or_lowers_emi() {
        let result = rate_change_impact(&floating_loan(7.75)).unwrap();
        assert!(result.tenure_reduction_months() > 0.0);
        assert!(result.interest_saved_keep_emi() > 0.0);
        assert!(result.interest_saved_keep_tenure() > 0.0);
    }

    #[test]
    fn test_keep_tenure_matches_fresh_emi() {
        let result = rate_change_impact(&floating_loan(10.0)).unwrap();
        let fresh = emi_for_annuity(3_000_000.0, 10.0 / 1200.0, 240.0).unwrap();
        assert_relative_eq!(result.keep_tenure.new_emi, fresh, max_relative = 1e-6);
    }

    #[test]
    fn test_unchanged_rate_is_neutral() {
        let result = rate_change_impact(&floating_loan(8.5)).unwrap();
        assert_eq!(result.keep_emi.old_tenure_months, result.keep_emi.new_tenure_months);
        assert_relative_eq!(result.keep_tenure.new_emi, result.keep_tenure.old_emi, max_relative = 1e-9);
    }

    #[test]
    fn test_hike_beyond_installment_is_domain_error() {
        // At 30% the monthly interest of 75,000 exceeds the ~26,000 installment
        let err = rate_change_impact(&floating_loan(30.0)).unwrap_err();
        assert!(err.is_domain_error());
    }

    #[test]
    fn test_revised_rate_must_be_positive() {
        let err = rate_change_impact(&floating_loan(0.0)).unwrap_err();
        assert_eq!(err.field(), Some("revised_annual_rate_percent"));
    }
}
