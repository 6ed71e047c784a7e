//! Quota domain module.
//!
//! Daily-reset balances, plan allotments and the action cost catalog.
//!
//! # Module Structure
//!
//! - `plan` - PlanId subscription levels
//! - `allotment` - Per-plan daily allotments
//! - `action` - Gated actions and their costs
//! - `catalog` - Combined product configuration
//! - `state` - The persisted balance record
//! - `outcome` - Results returned to callers
//! - `pricing` - Checkout prices for paid plans

mod action;
mod allotment;
mod catalog;
mod errors;
mod outcome;
mod plan;
mod pricing;
mod state;

pub use action::{ActionCatalog, ActionId, RequestedAction};
pub use allotment::{Allotment, PlanCatalog};
pub use catalog::QuotaCatalog;
pub use errors::{InsufficientQuota, QuotaError};
pub use outcome::{ConsumeOutcome, PendingAction, QuotaSnapshot};
pub use plan::PlanId;
pub use pricing::PlanPricing;
pub use state::QuotaState;
