//! Quota-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors raised by quota operations.
///
/// Insufficient balance is not among them: it is a normal
/// [`ConsumeOutcome`](super::ConsumeOutcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuotaError {
    #[error("unknown plan: {0}")]
    UnknownPlan(String),
}

impl From<QuotaError> for DomainError {
    fn from(err: QuotaError) -> Self {
        match err {
            QuotaError::UnknownPlan(ref plan) => {
                DomainError::new(ErrorCode::UnknownPlan, err.to_string()).with_detail("plan", plan)
            }
        }
    }
}

impl From<ValidationError> for QuotaError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::UnknownIdentifier { value, .. } => QuotaError::UnknownPlan(value),
            other => QuotaError::UnknownPlan(other.to_string()),
        }
    }
}

/// Balance too low for the requested debit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("insufficient quota: {required} required, {remaining} remaining")]
pub struct InsufficientQuota {
    pub required: u32,
    pub remaining: u32,
}
