//! Closed-form annuity formulas
//!
//! `i` is always a monthly decimal rate and `periods` a month count. Periods are
//! taken as `f64` because a remaining loan tenure solved from an installment is
//! generally fractional.

use crate::error::check::finite_output;
use crate::error::{EngineError, EngineResult};
use log::warn;

fn require_rate(operation: &str, i: f64) -> EngineResult<()> {
    if !i.is_finite() || i < 0.0 {
        return Err(EngineError::domain(
            operation,
            format!("monthly rate must be finite and non-negative, got {}", i),
        ));
    }
    Ok(())
}

fn require_periods(operation: &str, periods: f64) -> EngineResult<()> {
    if !periods.is_finite() || periods <= 0.0 {
        return Err(EngineError::domain(
            operation,
            format!("period count must be positive, got {}", periods),
        ));
    }
    Ok(())
}

fn require_amount(operation: &str, name: &str, amount: f64) -> EngineResult<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(EngineError::domain(
            operation,
            format!("{} must be finite and non-negative, got {}", name, amount),
        ));
    }
    Ok(())
}

/// Growth factor `(1+i)^periods`
pub fn compound_factor(i: f64, periods: f64) -> EngineResult<f64> {
    require_rate("compound_factor", i)?;
    if !periods.is_finite() || periods < 0.0 {
        return Err(EngineError::domain(
            "compound_factor",
            format!("period count must be non-negative, got {}", periods),
        ));
    }
    finite_output("compound_factor", (periods * i.ln_1p()).exp())
}

/// `(1+i)^periods − 1`, accurate for rates close to zero
fn growth_minus_one(operation: &str, i: f64, periods: f64) -> EngineResult<f64> {
    finite_output(operation, (periods * i.ln_1p()).exp_m1())
}

/// Equated installment that amortizes `principal` over `periods` months
///
/// EMI = P × i × (1+i)^n / ((1+i)^n − 1), or `P / n` when `i == 0`.
pub fn emi_for_annuity(principal: f64, i: f64, periods: f64) -> EngineResult<f64> {
    require_amount("emi_for_annuity", "principal", principal)?;
    require_rate("emi_for_annuity", i)?;
    require_periods("emi_for_annuity", periods)?;

    if i == 0.0 {
        return finite_output("emi_for_annuity", principal / periods);
    }

    let growth = compound_factor(i, periods)?;
    let denominator = growth_minus_one("emi_for_annuity", i, periods)?;
    finite_output("emi_for_annuity", principal * i * growth / denominator)
}

/// Number of months an installment of `emi` needs to amortize `principal`
///
/// Returns the continuous month count `ln(k / (k − i)) / ln(1 + i)` with
/// `k = emi / principal`, evaluated as `ln_1p(i / (k − i))` so tiny rates keep
/// their precision. When the rate is zero, or the installment never covers
/// the monthly interest (`k ≤ i`), the linear estimate `principal / emi` is
/// returned instead.
pub fn tenure_from_emi(principal: f64, emi: f64, i: f64) -> EngineResult<f64> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(EngineError::domain(
            "tenure_from_emi",
            format!("principal must be positive, got {}", principal),
        ));
    }
    if !emi.is_finite() || emi <= 0.0 {
        return Err(EngineError::domain(
            "tenure_from_emi",
            format!("emi must be positive, got {}", emi),
        ));
    }
    require_rate("tenure_from_emi", i)?;

    let k = emi / principal;
    if i > 0.0 && k > i {
        let months = (i / (k - i)).ln_1p() / i.ln_1p();
        return finite_output("tenure_from_emi", months);
    }

    if i > 0.0 {
        warn!(
            "tenure_from_emi: installment {:.4} does not cover interest on {:.4} at {:.6}/month; using linear estimate",
            emi, principal, i
        );
    }
    finite_output("tenure_from_emi", principal / emi)
}

/// Present value of `periods` end-of-month payments of `emi`
///
/// PV = emi × ((1+i)^n − 1) / (i × (1+i)^n), or `emi × n` when `i == 0`.
pub fn present_value_of_annuity(emi: f64, i: f64, periods: f64) -> EngineResult<f64> {
    require_amount("present_value_of_annuity", "emi", emi)?;
    require_rate("present_value_of_annuity", i)?;
    require_periods("present_value_of_annuity", periods)?;

    if i == 0.0 {
        return finite_output("present_value_of_annuity", emi * periods);
    }

    let growth = compound_factor(i, periods)?;
    let numerator = growth_minus_one("present_value_of_annuity", i, periods)?;
    finite_output("present_value_of_annuity", emi * numerator / (i * growth))
}

/// Future value of `periods` start-of-month contributions (annuity-due)
///
/// FV = payment × ((1+i)^n − 1) / i × (1+i), or `payment × n` when `i == 0`.
pub fn future_value_of_annuity_due(payment: f64, i: f64, periods: f64) -> EngineResult<f64> {
    require_amount("future_value_of_annuity_due", "payment", payment)?;
    require_rate("future_value_of_annuity_due", i)?;
    require_periods("future_value_of_annuity_due", periods)?;

    if i == 0.0 {
        return finite_output("future_value_of_annuity_due", payment * periods);
    }

    let accumulated = growth_minus_one("future_value_of_annuity_due", i, periods)?;
    finite_output(
        "future_value_of_annuity_due",
        payment * (accumulated / i) * (1.0 + i),
    )
}
