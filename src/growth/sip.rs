//! Systematic investment plan (recurring monthly contribution)

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{check, EngineResult};
use crate::rates::{future_value_of_annuity_due, monthly_rate};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SipInput {
    pub monthly_investment: f64,

    /// Expected annual return in percent
    pub annual_return_rate_percent: f64,

    pub period_months: u32,
}

impl SipInput {
    pub fn validate(&self) -> EngineResult<()> {
        check::positive("monthly_investment", self.monthly_investment)?;
        check::non_negative("annual_return_rate_percent", self.annual_return_rate_percent)?;
        check::at_least_one_month("period_months", self.period_months)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SipResult {
    /// `monthly_investment × period_months`
    pub invested_amount: f64,
    pub maturity_value: f64,
    /// `maturity_value − invested_amount`, never negative
    pub estimated_return: f64,
}

/// Maturity value of a SIP, contributions compounding from the start of each month
pub fn future_value(input: &SipInput) -> EngineResult<SipResult> {
    input.validate()?;

    let i = monthly_rate(input.annual_return_rate_percent);
    let periods = input.period_months as f64;
    let invested_amount = check::finite_output("future_value", input.monthly_investment * periods)?;

    // Clamp guards the last ulp; the annuity-due value is never below the sum of contributions
    let maturity_value =
        future_value_of_annuity_due(input.monthly_investment, i, periods)?.max(invested_amount);

    debug!(
        "sip: {:.2}/month for {} months at {}% -> {:.2}",
        input.monthly_investment, input.period_months, input.annual_return_rate_percent, maturity_value
    );

    Ok(SipResult {
        invested_amount,
        maturity_value,
        estimated_return: maturity_value - invested_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_rate_is_exact() {
        let result = future_value(&SipInput {
            monthly_investment: 1000.0,
            annual_return_rate_percent: 0.0,
            period_months: 12,
        })
        .unwrap();

        assert_eq!(result.invested_amount, 12_000.0);
        assert_eq!(result.maturity_value, 12_000.0);
        assert_eq!(result.estimated_return, 0.0);
    }

    #[test]
    fn test_ten_year_sip() {
        // 5,000/month at 12% for 10 years
        let result = future_value(&SipInput {
            monthly_investment: 5000.0,
            annual_return_rate_percent: 12.0,
            period_months: 120,
        })
        .unwrap();

        assert_eq!(result.invested_amount, 600_000.0);
        assert_relative_eq!(result.maturity_value, 1_161_695.38, epsilon = 0.01);
        assert_relative_eq!(
            result.estimated_return,
            result.maturity_value - result.invested_amount
        );
    }

    #[test]
    fn test_single_month_earns_one_period() {
        let result = future_value(&SipInput {
            monthly_investment: 1000.0,
            annual_return_rate_percent: 12.0,
            period_months: 1,
        })
        .unwrap();
        assert_relative_eq!(result.maturity_value, 1010.0, max_relative = 1e-12);
    }

    #[test]
    fn test_return_never_negative_for_tiny_rate() {
        let result = future_value(&SipInput {
            monthly_investment: 333.33,
            annual_return_rate_percent: 1e-12,
            period_months: 7,
        })
        .unwrap();
        assert!(result.estimated_return >= 0.0);
    }

    #[test]
    fn test_validation() {
        let base = SipInput {
            monthly_investment: 1000.0,
            annual_return_rate_percent: 10.0,
            period_months: 12,
        };

        let err = future_value(&SipInput { monthly_investment: 0.0, ..base }).unwrap_err();
        assert_eq!(err.field(), Some("monthly_investment"));

        let err = future_value(&SipInput { annual_return_rate_percent: -1.0, ..base }).unwrap_err();
        assert_eq!(err.field(), Some("annual_return_rate_percent"));

        let err = future_value(&SipInput { period_months: 0, ..base }).unwrap_err();
        assert_eq!(err.field(), Some("period_months"));
    }

    #[test]
    fn test_invested_amount_overflow_is_domain_error() {
        let err = future_value(&SipInput {
            monthly_investment: 1e306,
            annual_return_rate_percent: 0.0,
            period_months: 1000,
        })
        .unwrap_err();
        assert!(err.is_domain_error());
    }
}
