//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Local Persistence
//!
//! - `KeyValueStore` - String values under versioned keys
//! - `PersistedSlot` - Typed, best-effort JSON view over one key
//!
//! ## Time
//!
//! - `Clock` - Local calendar day and current instant
//!
//! ## Backend
//!
//! - `AuthGateway` - Session issuance
//! - `PaymentGateway` - Plan checkout and payment status

mod auth_gateway;
mod backend_error;
mod clock;
mod key_value_store;
mod payment_gateway;
mod persisted_slot;

pub use auth_gateway::{
    AuthGateway, Credentials, PasswordReset, Registration, SessionClaims, SessionToken,
};
pub use backend_error::{BackendError, BackendErrorCode};
pub use clock::{Clock, SystemClock};
pub use key_value_store::{KeyValueStore, StoreError};
pub use payment_gateway::{PaymentGateway, PaymentPreference, PaymentStatus, PreferenceRequest};
pub use persisted_slot::PersistedSlot;
