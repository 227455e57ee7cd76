//! What-if analysis on a running loan
//!
//! A change to the loan (a part prepayment, or a revised rate) can be absorbed in
//! two ways, and both are always reported:
//! - **keep EMI**: the installment stays, the remaining tenure moves
//! - **keep tenure**: the remaining tenure stays, the installment moves

mod prepayment;
mod rate_change;

pub use prepayment::{prepayment_impact, Prepayment, PrepaymentInput};
pub use rate_change::{rate_change_impact, RateChangeInput};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{check, EngineError, EngineResult};
use crate::rates::{emi_for_annuity, tenure_from_emi};

/// Outcome when the installment is held fixed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeepEmiOutcome {
    pub old_tenure_months: f64,
    pub new_tenure_months: f64,
    pub old_interest: f64,
    pub new_interest: f64,
}

/// Outcome when the remaining tenure is held fixed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeepTenureOutcome {
    pub old_emi: f64,
    pub new_emi: f64,
    pub old_interest: f64,
    pub new_interest: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Remaining tenure implied by the current installment (fractional months)
    pub current_tenure_months: f64,
    pub keep_emi: KeepEmiOutcome,
    pub keep_tenure: KeepTenureOutcome,
}

impl ScenarioResult {
    pub fn interest_saved_keep_emi(&self) -> f64 {
        self.keep_emi.old_interest - self.keep_emi.new_interest
    }

    pub fn interest_saved_keep_tenure(&self) -> f64 {
        self.keep_tenure.old_interest - self.keep_tenure.new_interest
    }

    /// Months removed from the loan under keep-EMI (negative if it grew)
    pub fn tenure_reduction_months(&self) -> f64 {
        self.keep_emi.old_tenure_months - self.keep_emi.new_tenure_months
    }

    /// Installment reduction under keep-tenure (negative if it grew)
    pub fn emi_reduction(&self) -> f64 {
        self.keep_tenure.old_emi - self.keep_tenure.new_emi
    }
}

/// Current and counterfactual legs of a loan change
struct LoanChange {
    principal: f64,
    emi: f64,
    monthly_rate: f64,
    new_principal: f64,
    new_monthly_rate: f64,
}

fn require_amortizing(operation: &str, leg: &str, principal: f64, emi: f64, i: f64) -> EngineResult<()> {
    let interest = principal * i;
    if emi <= interest {
        return Err(EngineError::domain(
            operation,
            format!(
                "{} installment {:.2} does not cover monthly interest {:.2}",
                leg, emi, interest
            ),
        ));
    }
    Ok(())
}

fn compare(operation: &str, change: LoanChange) -> EngineResult<ScenarioResult> {
    let LoanChange {
        principal,
        emi,
        monthly_rate,
        new_principal,
        new_monthly_rate,
    } = change;

    require_amortizing(operation, "current", principal, emi, monthly_rate)?;
    let current_tenure = tenure_from_emi(principal, emi, monthly_rate)?;
    let old_interest = check::finite_output(operation, emi * current_tenure)? - principal;

    require_amortizing(operation, "revised", new_principal, emi, new_monthly_rate)?;
    let new_tenure = tenure_from_emi(new_principal, emi, new_monthly_rate)?;
    let keep_emi = KeepEmiOutcome {
        old_tenure_months: current_tenure,
        new_tenure_months: new_tenure,
        old_interest,
        new_interest: check::finite_output(operation, emi * new_tenure)? - new_principal,
    };

    let new_emi = emi_for_annuity(new_principal, new_monthly_rate, current_tenure)?;
    let keep_tenure = KeepTenureOutcome {
        old_emi: emi,
        new_emi,
        old_interest,
        new_interest: check::finite_output(operation, new_emi * current_tenure)? - new_principal,
    };

    debug!(
        "{}: tenure {:.2}->{:.2} (keep emi), emi {:.2}->{:.2} (keep tenure)",
        operation, current_tenure, new_tenure, emi, new_emi
    );

    Ok(ScenarioResult {
        current_tenure_months: current_tenure,
        keep_emi,
        keep_tenure,
    })
}
