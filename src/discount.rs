//! Discount and sales-tax calculator

use serde::{Deserialize, Serialize};

use crate::error::{check, EngineError, EngineResult};

/// Whether tax is levied on the discounted or the list amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaxTiming {
    #[default]
    AfterDiscount,
    BeforeDiscount,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountInput {
    /// List amount
    pub amount: f64,
    /// Discount in percent, [0, 100]
    pub discount_percent: f64,
    /// Tax in percent
    #[serde(default)]
    pub tax_percent: f64,
    #[serde(default)]
    pub tax_timing: TaxTiming,
}

impl DiscountInput {
    pub fn validate(&self) -> EngineResult<()> {
        check::positive("amount", self.amount)?;
        check::non_negative("discount_percent", self.discount_percent)?;
        if self.discount_percent > 100.0 {
            return Err(EngineError::invalid(
                "discount_percent",
                format!("must be at most 100, got {}", self.discount_percent),
            ));
        }
        check::non_negative("tax_percent", self.tax_percent)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountResult {
    pub saving: f64,
    pub discounted_amount: f64,
    pub tax: f64,
    pub payable: f64,
}

pub fn calculate(input: &DiscountInput) -> EngineResult<DiscountResult> {
    input.validate()?;

    let saving = input.amount * (input.discount_percent / 100.0);
    let discounted_amount = input.amount - saving;
    let taxable = match input.tax_timing {
        TaxTiming::AfterDiscount => discounted_amount,
        TaxTiming::BeforeDiscount => input.amount,
    };
    let tax = check::finite_output("discount", taxable * (input.tax_percent / 100.0))?;

    Ok(DiscountResult {
        saving,
        discounted_amount,
        tax,
        payable: check::finite_output("discount", discounted_amount + tax)?,
    })
}
