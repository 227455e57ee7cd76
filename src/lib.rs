//! Loan Scenario Engine - loan amortization and investment growth calculators
//!
//! This library provides:
//! - EMI computation and lazy month-by-month amortization schedules
//! - Loan eligibility from income and FOIR
//! - Moratorium restructuring (fixed EMI or fixed tenure)
//! - Prepayment and rate-change scenario comparison
//! - SIP, lumpsum and systematic withdrawal growth
//! - Discount and sales-tax calculation
//! - A tagged request type and batch runner shared by the CLI and HTTP handler
//!
//! All calculators are pure functions over `f64` money values. Invalid inputs are
//! rejected with [`EngineError::InvalidInput`]; mathematically impossible requests
//! yield [`EngineError::DomainError`]. No public operation returns NaN or infinity.

pub mod error;
pub mod rates;
pub mod loan;
pub mod eligibility;
pub mod restructuring;
pub mod scenario;
pub mod growth;
pub mod discount;
pub mod config;
pub mod runner;

// Re-export commonly used types
pub use error::{EngineError, EngineResult};
pub use loan::{amortize, AmortizationResult, AmortizationSummary, LoanTerms, MonthRow, Schedule};
pub use eligibility::{EligibilityInput, EligibilityResult};
pub use restructuring::{restructure, MoratoriumInput, MoratoriumPolicy, MoratoriumResult};
pub use scenario::{
    prepayment_impact, rate_change_impact, Prepayment, PrepaymentInput, RateChangeInput,
    ScenarioResult,
};
pub use growth::{SipInput, SipResult, LumpsumInput, LumpsumResult, SwpInput, SwpResult};
pub use discount::{DiscountInput, DiscountResult, TaxTiming};
pub use config::RunnerConfig;
pub use runner::{CalculationOutcome, CalculationRequest, CalculationRunner};
