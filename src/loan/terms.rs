//! Loan terms input

use serde::{Deserialize, Serialize};

use crate::error::{check, EngineResult};
use crate::rates::monthly_rate;

/// Immutable terms of a standard reducing-balance loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed
    pub principal: f64,

    /// Nominal annual rate in percent (12.0 = 12% p.a.)
    pub annual_rate_percent: f64,

    /// Number of monthly installments
    pub tenure_months: u32,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate_percent: f64, tenure_months: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            tenure_months,
        }
    }

    /// Check `principal > 0`, `rate >= 0`, `tenure >= 1`
    pub fn validate(&self) -> EngineResult<()> {
        check::positive("principal", self.principal)?;
        check::non_negative("annual_rate_percent", self.annual_rate_percent)?;
        check::at_least_one_month("tenure_months", self.tenure_months)?;
        Ok(())
    }

    /// Monthly decimal rate
    pub fn monthly_rate(&self) -> f64 {
        monthly_rate(self.annual_rate_percent)
    }
}
