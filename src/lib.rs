//! Contract Quota - usage ledger for a contract-authoring tool
//!
//! Tracks a per-day quota of paid actions (PDF export) across subscription
//! plans, persists the balance, history and templates of the contract
//! workspace, and talks to the auth and payment backend.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
