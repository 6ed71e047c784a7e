//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (period keys, IDs, errors)
//! - `quota` - Plans, allotments, action costs and the balance record
//! - `contract` - Contract records, history and templates

pub mod contract;
pub mod foundation;
pub mod quota;
