//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Key-value stores (file, in-memory)
//! - `backend` - HTTP client for the auth and payment endpoints
//! - `clock` - Settable clock for tests

pub mod backend;
pub mod clock;
pub mod storage;

pub use backend::HttpBackendClient;
pub use clock::FixedClock;
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
