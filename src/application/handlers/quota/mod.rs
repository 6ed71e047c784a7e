//! Quota handlers.
//!
//! ## Commands
//! - Selecting a plan (direct for free, hosted checkout for paid)
//! - Confirming a checkout payment

mod confirm_payment;
mod select_plan;

pub use confirm_payment::{ConfirmPaymentCommand, ConfirmPaymentHandler, ConfirmPaymentResult};
pub use select_plan::{SelectPlanCommand, SelectPlanHandler, SelectPlanResult};
