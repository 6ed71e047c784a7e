//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Backend URL must use http or https")]
    InvalidBackendUrl,

    #[error("Backend timeout must be between 1 and 120 seconds")]
    InvalidTimeout,

    #[error("Reset check interval must be greater than zero")]
    InvalidResetInterval,

    #[error("Plan allotments must satisfy free <= basic <= pro")]
    AllotmentOrder,

    #[error("Paid plan prices must be greater than zero")]
    InvalidPrice,

    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    #[error("Invalid log level directive: {0}")]
    InvalidLogLevel(String),
}
