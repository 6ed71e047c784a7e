//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `CONTRACT_QUOTA` prefix
//! and nested values are separated by double underscores. Every section has
//! defaults, so an empty environment yields a working configuration.
//!
//! # Example
//!
//! ```no_run
//! use contract_quota::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Backend at {}", config.backend.base_url);
//! ```

mod backend;
mod error;
mod logging;
mod payment;
mod quota;
mod storage;

pub use backend::BackendConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use payment::PaymentConfig;
pub use quota::QuotaConfig;
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Key-value store location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Auth and payment backend
    #[serde(default)]
    pub backend: BackendConfig,

    /// Allotments, costs and reset cadence
    #[serde(default)]
    pub quota: QuotaConfig,

    /// Checkout prices
    #[serde(default)]
    pub payment: PaymentConfig,

    /// Subscriber filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present
    /// 2. Reads environment variables with `CONTRACT_QUOTA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CONTRACT_QUOTA__BACKEND__BASE_URL=...` -> `backend.base_url = ...`
    /// - `CONTRACT_QUOTA__QUOTA__FREE_ALLOTMENT=5` -> `quota.free_allotment = 5`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CONTRACT_QUOTA")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.backend.validate()?;
        self.quota.validate()?;
        self.payment.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
