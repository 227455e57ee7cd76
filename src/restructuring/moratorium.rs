//! Moratorium capitalization and re-amortization

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{check, EngineError, EngineResult};
use crate::loan::{amortize, AmortizationSummary, LoanTerms};
use crate::rates::{emi_for_annuity, tenure_from_emi};

/// How the borrower absorbs the capitalized interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MoratoriumPolicy {
    /// Same installment, longer tenure
    #[default]
    FixedEmi,
    /// Same end date, larger installment
    FixedTenure,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoratoriumInput {
    pub principal: f64,
    pub annual_rate_percent: f64,

    /// Original loan tenure
    pub tenure_months: u32,

    /// Length of the freeze, strictly inside the loan term
    pub moratorium_months: u32,

    #[serde(default)]
    pub policy: MoratoriumPolicy,
}

impl MoratoriumInput {
    pub fn validate(&self) -> EngineResult<()> {
        check::positive("principal", self.principal)?;
        check::positive("annual_rate_percent", self.annual_rate_percent)?;
        check::at_least_one_month("tenure_months", self.tenure_months)?;

        if self.moratorium_months < 1 || self.moratorium_months >= self.tenure_months {
            return Err(EngineError::invalid(
                "moratorium_months",
                format!(
                    "must be between 1 and {} for a {}-month loan, got {}",
                    self.tenure_months.saturating_sub(1),
                    self.tenure_months,
                    self.moratorium_months
                ),
            ));
        }
        Ok(())
    }

    fn terms(&self) -> LoanTerms {
        LoanTerms::new(self.principal, self.annual_rate_percent, self.tenure_months)
    }
}

/// Baseline loan next to its restructured counterpart
///
/// `restructured.principal` is the capitalized principal, while
/// `restructured.total_interest` is measured against the original principal so
/// that the capitalized interest counts as interest paid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoratoriumResult {
    pub policy: MoratoriumPolicy,

    /// The loan had there been no freeze
    pub baseline: AmortizationSummary,

    pub restructured: AmortizationSummary,

    /// Simple interest accrued during the freeze
    pub capitalized_interest: f64,

    /// Unrounded remaining tenure after the freeze; totals are computed on this
    pub solved_tenure_months: f64,
}

impl MoratoriumResult {
    /// Additional interest caused by the freeze
    pub fn additional_interest(&self) -> f64 {
        self.restructured.total_interest - self.baseline.total_interest
    }

    /// Change in installment (zero under FixedEmi)
    pub fn emi_increase(&self) -> f64 {
        self.restructured.emi - self.baseline.emi
    }
}

/// Re-amortize a loan after `moratorium_months` of frozen installments
pub fn restructure(input: &MoratoriumInput) -> EngineResult<MoratoriumResult> {
    input.validate()?;

    let baseline = amortize(&input.terms())?;
    let i = baseline.monthly_rate;

    let capitalized_interest = input.principal * i * input.moratorium_months as f64;
    let new_principal = check::finite_output("restructure", input.principal + capitalized_interest)?;

    let (emi, solved_tenure_months) = match input.policy {
        MoratoriumPolicy::FixedEmi => {
            let emi = baseline.emi;
            let monthly_interest = new_principal * i;
            if emi <= monthly_interest {
                return Err(EngineError::domain(
                    "restructure",
                    format!(
                        "installment {:.2} cannot cover monthly interest {:.2} on the capitalized principal",
                        emi, monthly_interest
                    ),
                ));
            }
            (emi, tenure_from_emi(new_principal, emi, i)?)
        }
        MoratoriumPolicy::FixedTenure => {
            let remaining = input.tenure_months.saturating_sub(input.moratorium_months).max(1);
            let emi = emi_for_annuity(new_principal, i, remaining as f64)?;
            (emi, remaining as f64)
        }
    };

    let total_payment = check::finite_output("restructure", emi * solved_tenure_months)?;
    let restructured = AmortizationSummary {
        principal: new_principal,
        emi,
        tenure_months: (solved_tenure_months.round() as u32).max(1),
        total_interest: total_payment - input.principal,
        total_payment,
    };

    debug!(
        "restructure {:?}: capitalized={:.2} emi {:.2}->{:.2} tenure {}->{:.2}",
        input.policy,
        capitalized_interest,
        baseline.emi,
        emi,
        input.tenure_months,
        solved_tenure_months
    );

    Ok(MoratoriumResult {
        policy: input.policy,
        baseline: baseline.summary(),
        restructured,
        capitalized_interest,
        solved_tenure_months,
    })
}
