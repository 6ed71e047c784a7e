//! Errors from the remote backend (auth and payment endpoints).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors from backend gateway operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendError {
    /// Error code for categorization.
    pub code: BackendErrorCode,

    /// Human-readable message, from the server when it sent one.
    pub message: String,

    /// HTTP status (if a response was received).
    pub status: Option<u16>,
}

impl BackendError {
    /// Fallback shown when neither the server nor the transport gave a message.
    pub const GENERIC_MESSAGE: &'static str = "Something went wrong.";

    /// Create a new backend error.
    pub fn new(code: BackendErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
        }
    }

    /// Attach the HTTP status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(BackendErrorCode::NetworkError, message)
    }

    /// Create a rejection carrying the server's message.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::new(BackendErrorCode::Rejected, message).with_status(status)
    }

    /// Create an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(BackendErrorCode::InvalidResponse, message)
    }

    /// Message suitable for showing to the user.
    ///
    /// Rejections surface the server's own message; transport and decoding
    /// failures collapse to [`BackendError::GENERIC_MESSAGE`].
    pub fn user_message(&self) -> &str {
        match self.code {
            BackendErrorCode::Rejected if !self.message.trim().is_empty() => &self.message,
            _ => Self::GENERIC_MESSAGE,
        }
    }
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for BackendError {}

impl From<BackendError> for DomainError {
    fn from(err: BackendError) -> Self {
        let code = match err.code {
            BackendErrorCode::Rejected => ErrorCode::BackendRejected,
            BackendErrorCode::NetworkError | BackendErrorCode::InvalidResponse => {
                ErrorCode::BackendUnavailable
            }
        };

        DomainError::new(code, err.user_message())
    }
}

/// Backend error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendErrorCode {
    /// Connection failed or timed out.
    NetworkError,

    /// Server answered with a non-2xx status.
    Rejected,

    /// Server answered 2xx with a body we could not decode.
    InvalidResponse,
}

impl std::fmt::Display for BackendErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BackendErrorCode::NetworkError => "network_error",
            BackendErrorCode::Rejected => "rejected",
            BackendErrorCode::InvalidResponse => "invalid_response",
        };
        write!(f, "{}", s)
    }
}
