//! Error types shared by every calculator
//!
//! Two kinds of failure exist:
//! - **InvalidInput**: a precondition on a public input struct is violated
//! - **DomainError**: a formula's mathematical precondition cannot be met
//!
//! Both are returned to the immediate caller and never retried.

use serde::Serialize;
use thiserror::Error;

/// Result type returned by every engine operation
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine failure, identifying which precondition was violated
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineError {
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Domain error in {operation}: {reason}")]
    DomainError { operation: String, reason: String },
}

impl EngineError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn domain(operation: &str, reason: impl Into<String>) -> Self {
        EngineError::DomainError {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }

    /// Field name for `InvalidInput`, `None` for domain errors
    pub fn field(&self) -> Option<&str> {
        match self {
            EngineError::InvalidInput { field, .. } => Some(field),
            EngineError::DomainError { .. } => None,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, EngineError::InvalidInput { .. })
    }

    pub fn is_domain_error(&self) -> bool {
        matches!(self, EngineError::DomainError { .. })
    }
}

/// Input checks used by the calculators' validators
pub(crate) mod check {
    use super::{EngineError, EngineResult};

    pub fn finite(field: &str, value: f64) -> EngineResult<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EngineError::invalid(field, format!("must be a finite number, got {}", value)))
        }
    }

    pub fn positive(field: &str, value: f64) -> EngineResult<f64> {
        finite(field, value)?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(EngineError::invalid(field, format!("must be greater than zero, got {}", value)))
        }
    }

    pub fn non_negative(field: &str, value: f64) -> EngineResult<f64> {
        finite(field, value)?;
        if value >= 0.0 {
            Ok(value)
        } else {
            Err(EngineError::invalid(field, format!("must not be negative, got {}", value)))
        }
    }

    /// Computed value must stay inside the `f64` range
    pub fn finite_output(operation: &str, value: f64) -> EngineResult<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EngineError::domain(operation, "result overflowed the floating point range"))
        }
    }

    pub fn at_least_one_month(field: &str, months: u32) -> EngineResult<u32> {
        if months >= 1 {
            Ok(months)
        } else {
            Err(EngineError::invalid(field, "must be at least 1 month"))
        }
    }
}
