//! Loan eligibility from income affordability
//!
//! Income and the FOIR cap give the largest installment a borrower can carry;
//! discounting that installment over the tenure gives the largest loan.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{check, EngineError, EngineResult};
use crate::rates::{monthly_rate, present_value_of_annuity};

/// Affordability inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EligibilityInput {
    pub gross_monthly_income: f64,

    /// Share of income allowed for all debt service, in percent (0, 100]
    pub foir_percent: f64,

    /// Installments already being paid
    #[serde(default)]
    pub existing_monthly_emis: f64,

    pub annual_rate_percent: f64,

    pub tenure_months: u32,
}

impl EligibilityInput {
    pub fn validate(&self) -> EngineResult<()> {
        check::positive("gross_monthly_income", self.gross_monthly_income)?;
        check::positive("foir_percent", self.foir_percent)?;
        if self.foir_percent > 100.0 {
            return Err(EngineError::invalid(
                "foir_percent",
                format!("must be at most 100, got {}", self.foir_percent),
            ));
        }
        check::non_negative("existing_monthly_emis", self.existing_monthly_emis)?;
        check::positive("annual_rate_percent", self.annual_rate_percent)?;
        check::at_least_one_month("tenure_months", self.tenure_months)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    /// Installment headroom left after existing obligations
    pub eligible_emi: f64,

    /// Principal that headroom can service over the tenure
    pub eligible_loan_amount: f64,
}

impl EligibilityResult {
    pub const NONE: EligibilityResult = EligibilityResult {
        eligible_emi: 0.0,
        eligible_loan_amount: 0.0,
    };

    pub fn is_eligible(&self) -> bool {
        self.eligible_emi > 0.0
    }
}

/// Largest installment and loan amount the borrower qualifies for
pub fn evaluate(input: &EligibilityInput) -> EngineResult<EligibilityResult> {
    input.validate()?;

    let max_emi = input.foir_percent / 100.0 * input.gross_monthly_income;
    let eligible_emi = (max_emi - input.existing_monthly_emis).max(0.0);

    if eligible_emi == 0.0 {
        debug!(
            "eligibility: existing obligations {:.2} exhaust FOIR cap {:.2}",
            input.existing_monthly_emis, max_emi
        );
        return Ok(EligibilityResult::NONE);
    }

    let eligible_loan_amount = present_value_of_annuity(
        eligible_emi,
        monthly_rate(input.annual_rate_percent),
        input.tenure_months as f64,
    )?;

    debug!(
        "eligibility: emi headroom={:.2} -> loan={:.2}",
        eligible_emi, eligible_loan_amount
    );

    Ok(EligibilityResult {
        eligible_emi,
        eligible_loan_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn salaried() -> EligibilityInput {
        EligibilityInput {
            gross_monthly_income: 100_000.0,
            foir_percent: 40.0,
            existing_monthly_emis: 5_000.0,
            annual_rate_percent: 12.0,
            tenure_months: 120,
        }
    }

    #[test]
    fn test_worked_example() {
        let result = evaluate(&salaried()).unwrap();
        assert_eq!(result.eligible_emi, 35_000.0);

        let expected = 35_000.0 * (1.01_f64.powi(120) - 1.0) / (0.01 * 1.01_f64.powi(120));
        assert_relative_eq!(result.eligible_loan_amount, expected, max_relative = 1e-6);
        assert!(result.is_eligible());
    }

    #[test]
    fn test_obligations_exhaust_headroom() {
        let mut input = salaried();
        input.existing_monthly_emis = 40_000.0;
        assert_eq!(evaluate(&input).unwrap(), EligibilityResult::NONE);

        input.existing_monthly_emis = 55_000.0;
        let result = evaluate(&input).unwrap();
        assert_eq!(result.eligible_emi, 0.0);
        assert_eq!(result.eligible_loan_amount, 0.0);
        assert!(!result.is_eligible());
    }

    #[test]
    fn test_full_foir_allowed() {
        let mut input = salaried();
        input.foir_percent = 100.0;
        input.existing_monthly_emis = 0.0;
        assert_eq!(evaluate(&input).unwrap().eligible_emi, 100_000.0);
    }

    #[test]
    fn test_foir_out_of_range() {
        let mut input = salaried();
        input.foir_percent = 0.0;
        assert_eq!(evaluate(&input).unwrap_err().field(), Some("foir_percent"));

        input.foir_percent = 100.5;
        assert_eq!(evaluate(&input).unwrap_err().field(), Some("foir_percent"));
    }

    #[test]
    fn test_rate_and_tenure_must_be_positive() {
        let mut input = salaried();
        input.annual_rate_percent = 0.0;
        assert_eq!(evaluate(&input).unwrap_err().field(), Some("annual_rate_percent"));

        let mut input = salaried();
        input.tenure_months = 0;
        assert_eq!(evaluate(&input).unwrap_err().field(), Some("tenure_months"));

        let mut input = salaried();
        input.gross_monthly_income = -1.0;
        assert!(evaluate(&input).unwrap_err().is_invalid_input());
    }
}
