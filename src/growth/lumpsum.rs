//! One-time deposit compounded monthly

use serde::{Deserialize, Serialize};

use crate::error::{check, EngineResult};
use crate::rates::{compound_factor, monthly_rate};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LumpsumInput {
    pub amount: f64,
    pub annual_return_rate_percent: f64,
    pub period_months: u32,
}

impl LumpsumInput {
    pub fn validate(&self) -> EngineResult<()> {
        check::positive("amount", self.amount)?;
        check::non_negative("annual_return_rate_percent", self.annual_return_rate_percent)?;
        check::at_least_one_month("period_months", self.period_months)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LumpsumResult {
    pub invested_amount: f64,
    pub maturity_value: f64,
    pub estimated_return: f64,
}

pub fn lumpsum_future_value(input: &LumpsumInput) -> EngineResult<LumpsumResult> {
    input.validate()?;

    let i = monthly_rate(input.annual_return_rate_percent);
    let growth = compound_factor(i, input.period_months as f64)?;
    let maturity_value =
        check::finite_output("lumpsum_future_value", input.amount * growth)?.max(input.amount);

    Ok(LumpsumResult {
        invested_amount: input.amount,
        maturity_value,
        estimated_return: maturity_value - input.amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_monthly_compounding() {
        let result = lumpsum_future_value(&LumpsumInput {
            amount: 100_000.0,
            annual_return_rate_percent: 12.0,
            period_months: 12,
        })
        .unwrap();
        assert_relative_eq!(result.maturity_value, 112_682.503, epsilon = 1e-3);
        assert_relative_eq!(result.estimated_return, 12_682.503, epsilon = 1e-3);
    }

    #[test]
    fn test_zero_rate_returns_principal() {
        let result = lumpsum_future_value(&LumpsumInput {
            amount: 5000.0,
            annual_return_rate_percent: 0.0,
            period_months: 36,
        })
        .unwrap();
        assert_eq!(result.maturity_value, 5000.0);
        assert_eq!(result.estimated_return, 0.0);
    }

    #[test]
    fn test_amount_required() {
        let err = lumpsum_future_value(&LumpsumInput {
            amount: -1.0,
            annual_return_rate_percent: 5.0,
            period_months: 12,
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("amount"));
    }

    #[test]
    fn test_maturity_overflow_is_domain_error() {
        let err = lumpsum_future_value(&LumpsumInput {
            amount: 1e307,
            annual_return_rate_percent: 120.0,
            period_months: 360,
        })
        .unwrap_err();
        assert!(err.is_domain_error());
    }
}
