//! Backend Adapters
//!
//! - **HttpBackendClient** - `AuthGateway` and `PaymentGateway` over HTTP JSON

mod dto;
mod http_backend_client;

pub use http_backend_client::HttpBackendClient;
