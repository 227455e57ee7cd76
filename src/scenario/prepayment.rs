//! Part prepayment of an outstanding loan

use serde::{Deserialize, Serialize};

use super::{compare, LoanChange, ScenarioResult};
use crate::error::{check, EngineError, EngineResult};
use crate::rates::monthly_rate;

/// Size of a prepayment, with its unit stated explicitly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum Prepayment {
    /// Absolute amount in currency units
    Amount(f64),
    /// Share of the outstanding principal, in [0, 1)
    Fraction(f64),
}

impl Prepayment {
    /// Absolute amount this prepayment takes off `outstanding`
    pub fn amount_of(&self, outstanding: f64) -> f64 {
        match *self {
            Prepayment::Amount(amount) => amount,
            Prepayment::Fraction(fraction) => fraction * outstanding,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentInput {
    pub outstanding_principal: f64,
    pub current_annual_rate_percent: f64,
    pub current_emi: f64,
    pub prepayment: Prepayment,
}

impl PrepaymentInput {
    pub fn validate(&self) -> EngineResult<()> {
        check::positive("outstanding_principal", self.outstanding_principal)?;
        check::positive("current_annual_rate_percent", self.current_annual_rate_percent)?;
        check::positive("current_emi", self.current_emi)?;

        match self.prepayment {
            Prepayment::Amount(amount) => {
                check::non_negative("prepayment", amount)?;
                if amount >= self.outstanding_principal {
                    return Err(EngineError::invalid(
                        "prepayment",
                        format!(
                            "must be less than the outstanding principal {}, got {}",
                            self.outstanding_principal, amount
                        ),
                    ));
                }
            }
            Prepayment::Fraction(fraction) => {
                check::non_negative("prepayment", fraction)?;
                if fraction >= 1.0 {
                    return Err(EngineError::invalid(
                        "prepayment",
                        format!("fraction must be below 1, got {}", fraction),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Effect of a part prepayment on tenure (keep EMI) and on EMI (keep tenure)
pub fn prepayment_impact(input: &PrepaymentInput) -> EngineResult<ScenarioResult> {
    input.validate()?;

    let i = monthly_rate(input.current_annual_rate_percent);
    let paid = input.prepayment.amount_of(input.outstanding_principal);

    compare(
        "prepayment_impact",
        LoanChange {
            principal: input.outstanding_principal,
            emi: input.current_emi,
            monthly_rate: i,
            new_principal: input.outstanding_principal - paid,
            new_monthly_rate: i,
        },
    )
}
