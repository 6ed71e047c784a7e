//! Auth gateway port for session issuance.
//!
//! The backend owns accounts and passwords; this side only exchanges
//! credentials for an opaque session token and keeps it. The token's display
//! claims can be read locally but are never trusted for authorization.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::foundation::ValidationError;

use super::BackendError;

/// Exchanges credentials for session tokens.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Sign in with email and password.
    async fn login(&self, credentials: &Credentials) -> Result<SessionToken, BackendError>;

    /// Create an account and sign in.
    async fn register(&self, registration: &Registration) -> Result<SessionToken, BackendError>;

    /// Set a new password for the account with this email.
    async fn reset_password(&self, reset: &PasswordReset) -> Result<(), BackendError>;
}

/// Email and password for sign-in.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::new(password.into()),
        }
    }
}

/// New account details.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

/// Password reset request.
#[derive(Debug, Clone)]
pub struct PasswordReset {
    pub email: String,
    pub new_password: SecretString,
}

/// Display claims carried by a session token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionClaims {
    pub sub: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Opaque bearer token issued by the backend.
#[derive(Debug, Clone)]
pub struct SessionToken(SecretString);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::new(token.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Reads the token's display claims without verifying its signature.
    ///
    /// Only the backend can verify the token; these claims are for display.
    pub fn claims(&self) -> Result<SessionClaims, ValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        decode::<SessionClaims>(self.expose(), &DecodingKey::from_secret(&[]), &validation)
            .map(|data| data.claims)
            .map_err(|e| ValidationError::invalid_format("session_token", e.to_string()))
    }
}
