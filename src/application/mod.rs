//! Application layer - the ledger service, its ticker, and handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;
mod quota_ledger;
mod reset_ticker;

pub use quota_ledger::{QuotaLedger, QUOTA_STATE_KEY};
pub use reset_ticker::{ResetTicker, ResetTickerConfig};
