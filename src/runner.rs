//! Request dispatch and batch execution
//!
//! Every calculator is reachable through one closed [`CalculationRequest`] enum, so
//! the CLI, the loan-book binary and the HTTP handler share a single entry point.
//!
//! # Example
//! ```ignore
//! let runner = CalculationRunner::new(RunnerConfig::quick());
//!
//! let request: CalculationRequest = serde_json::from_str(
//!     r#"{"calculator":"emi","principal":500000,"annual_rate_percent":9,"tenure_months":60}"#,
//! )?;
//! let outcome = runner.run(&request)?;
//! ```

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::RunnerConfig;
use crate::discount::{self, DiscountInput, DiscountResult};
use crate::eligibility::{self, EligibilityInput, EligibilityResult};
use crate::error::{EngineError, EngineResult};
use crate::growth::{
    future_value, lumpsum_future_value, systematic_withdrawal, LumpsumInput, LumpsumResult,
    SipInput, SipResult, SwpInput, SwpResult,
};
use crate::loan::{amortize, AmortizationResult, AmortizationSummary, LoanRecord, LoanTerms, MonthRow};
use crate::restructuring::{restructure, MoratoriumInput, MoratoriumResult};
use crate::scenario::{
    prepayment_impact, rate_change_impact, PrepaymentInput, RateChangeInput, ScenarioResult,
};

/// One calculation, tagged by calculator name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculationRequest {
    Emi(LoanTerms),
    Eligibility(EligibilityInput),
    Moratorium(MoratoriumInput),
    Prepayment(PrepaymentInput),
    RateChange(RateChangeInput),
    Sip(SipInput),
    Lumpsum(LumpsumInput),
    Swp(SwpInput),
    Discount(DiscountInput),
}

/// EMI result with optional schedule rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiOutcome {
    #[serde(flatten)]
    pub amortization: AmortizationResult,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schedule: Vec<MonthRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculationOutcome {
    Emi(EmiOutcome),
    Eligibility(EligibilityResult),
    Moratorium(MoratoriumResult),
    Prepayment(ScenarioResult),
    RateChange(ScenarioResult),
    Sip(SipResult),
    Lumpsum(LumpsumResult),
    Swp(SwpResult),
    Discount(DiscountResult),
}

impl CalculationRequest {
    /// Calculator name as used in the `calculator` tag
    pub fn name(&self) -> &'static str {
        match self {
            CalculationRequest::Emi(_) => "emi",
            CalculationRequest::Eligibility(_) => "eligibility",
            CalculationRequest::Moratorium(_) => "moratorium",
            CalculationRequest::Prepayment(_) => "prepayment",
            CalculationRequest::RateChange(_) => "rate_change",
            CalculationRequest::Sip(_) => "sip",
            CalculationRequest::Lumpsum(_) => "lumpsum",
            CalculationRequest::Swp(_) => "swp",
            CalculationRequest::Discount(_) => "discount",
        }
    }

    /// Run the calculator; EMI outcomes carry no schedule rows
    pub fn evaluate(&self) -> EngineResult<CalculationOutcome> {
        Ok(match self {
            CalculationRequest::Emi(terms) => CalculationOutcome::Emi(EmiOutcome {
                amortization: amortize(terms)?,
                schedule: Vec::new(),
            }),
            CalculationRequest::Eligibility(input) => {
                CalculationOutcome::Eligibility(eligibility::evaluate(input)?)
            }
            CalculationRequest::Moratorium(input) => CalculationOutcome::Moratorium(restructure(input)?),
            CalculationRequest::Prepayment(input) => {
                CalculationOutcome::Prepayment(prepayment_impact(input)?)
            }
            CalculationRequest::RateChange(input) => {
                CalculationOutcome::RateChange(rate_change_impact(input)?)
            }
            CalculationRequest::Sip(input) => CalculationOutcome::Sip(future_value(input)?),
            CalculationRequest::Lumpsum(input) => CalculationOutcome::Lumpsum(lumpsum_future_value(input)?),
            CalculationRequest::Swp(input) => CalculationOutcome::Swp(systematic_withdrawal(input)?),
            CalculationRequest::Discount(input) => CalculationOutcome::Discount(discount::calculate(input)?),
        })
    }
}

/// Amortization outcome for one loan of a book
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanBookEntry {
    pub loan_id: String,
    pub result: Result<AmortizationSummary, EngineError>,
}

/// Executes requests according to a [`RunnerConfig`]
#[derive(Debug, Clone, Default)]
pub struct CalculationRunner {
    config: RunnerConfig,
}

impl CalculationRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Runner configured from `ENGINE_*` environment variables
    pub fn from_env() -> Self {
        Self::new(RunnerConfig::from_env())
    }

    /// Evaluate one request, attaching schedule rows if configured
    pub fn run(&self, request: &CalculationRequest) -> EngineResult<CalculationOutcome> {
        let mut outcome = request.evaluate()?;

        if let CalculationOutcome::Emi(ref mut emi) = outcome {
            if self.config.include_schedule {
                emi.schedule = self.schedule_rows(&emi.amortization);
            }
        }

        Ok(outcome)
    }

    /// Evaluate many independent requests; each result stands on its own
    pub fn run_batch(&self, requests: &[CalculationRequest]) -> Vec<EngineResult<CalculationOutcome>> {
        info!(
            "running {} requests ({})",
            requests.len(),
            if self.config.parallel { "parallel" } else { "sequential" }
        );

        if self.config.parallel {
            requests.par_iter().map(|r| self.run(r)).collect()
        } else {
            requests.iter().map(|r| self.run(r)).collect()
        }
    }

    /// Amortize every loan of a book
    pub fn amortize_book(&self, loans: &[LoanRecord]) -> Vec<LoanBookEntry> {
        info!("amortizing {} loans", loans.len());

        let amortize_one = |loan: &LoanRecord| LoanBookEntry {
            loan_id: loan.loan_id.clone(),
            result: amortize(&loan.terms).map(|r| r.summary()),
        };

        if self.config.parallel {
            loans.par_iter().map(amortize_one).collect()
        } else {
            loans.iter().map(amortize_one).collect()
        }
    }

    fn schedule_rows(&self, amortization: &AmortizationResult) -> Vec<MonthRow> {
        let rows = amortization.schedule();
        match self.config.schedule_preview_months {
            Some(months) => rows.take(months as usize).collect(),
            None => rows.collect(),
        }
    }
}
