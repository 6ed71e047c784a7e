//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the contract workspace domain.

mod errors;
mod ids;
mod period;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ContractId, TemplateId};
pub use period::PeriodKey;
