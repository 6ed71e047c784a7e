//! SignInHandler / RegisterHandler - Command handlers that open a session.

use std::sync::Arc;

use secrecy::SecretString;

use crate::domain::foundation::{DomainError, ValidationError};
use crate::ports::{AuthGateway, Credentials, KeyValueStore, Registration, SessionClaims};

use super::SessionStore;

/// Command to sign in.
#[derive(Debug, Clone)]
pub struct SignInCommand {
    pub email: String,
    pub password: SecretString,
}

/// Handler for signing in.
pub struct SignInHandler {
    gateway: Arc<dyn AuthGateway>,
    session: SessionStore,
}

impl SignInHandler {
    pub fn new(gateway: Arc<dyn AuthGateway>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            gateway,
            session: SessionStore::new(store),
        }
    }

    /// Signs in and stores the session. Returns the token's display claims.
    pub async fn handle(&self, cmd: SignInCommand) -> Result<SessionClaims, DomainError> {
        let email = required("email", &cmd.email)?;

        let token = self
            .gateway
            .login(&Credentials {
                email: email.to_string(),
                password: cmd.password,
            })
            .await?;
        self.session.save(&token).await;

        Ok(token.claims().unwrap_or_default())
    }
}

/// Command to create an account.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

/// Handler for registration.
pub struct RegisterHandler {
    gateway: Arc<dyn AuthGateway>,
    session: SessionStore,
}

impl RegisterHandler {
    pub fn new(gateway: Arc<dyn AuthGateway>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            gateway,
            session: SessionStore::new(store),
        }
    }

    pub async fn handle(&self, cmd: RegisterCommand) -> Result<SessionClaims, DomainError> {
        let name = required("name", &cmd.name)?;
        let email = required("email", &cmd.email)?;

        let token = self
            .gateway
            .register(&Registration {
                name: name.to_string(),
                email: email.to_string(),
                password: cmd.password,
            })
            .await?;
        self.session.save(&token).await;

        Ok(token.claims().unwrap_or_default())
    }
}

pub(super) fn required<'a>(
    field: &'static str,
    value: &'a str,
) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryKeyValueStore;
    use crate::application::handlers::auth::test_support::MockAuthGateway;
    use crate::domain::foundation::ErrorCode;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string())
    }

    #[tokio::test]
    async fn sign_in_stores_session() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let handler = SignInHandler::new(
            Arc::new(MockAuthGateway::new("maria@example.com", "secret")),
            store.clone(),
        );

        let claims = handler
            .handle(SignInCommand {
                email: " maria@example.com ".to_string(),
                password: secret("secret"),
            })
            .await
            .unwrap();

        assert_eq!(claims.email.as_deref(), Some("maria@example.com"));
        assert!(SessionStore::new(store).load().await.is_some());
    }

    #[tokio::test]
    async fn wrong_password_keeps_signed_out() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let handler = SignInHandler::new(
            Arc::new(MockAuthGateway::new("maria@example.com", "secret")),
            store.clone(),
        );

        let err = handler
            .handle(SignInCommand {
                email: "maria@example.com".to_string(),
                password: secret("wrong"),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::BackendRejected);
        assert_eq!(err.message(), "Invalid credentials");
        assert!(SessionStore::new(store).load().await.is_none());
    }

    #[tokio::test]
    async fn blank_email_is_rejected_locally() {
        let handler = SignInHandler::new(
            Arc::new(MockAuthGateway::new("maria@example.com", "secret")),
            Arc::new(InMemoryKeyValueStore::new()),
        );

        let err = handler
            .handle(SignInCommand {
                email: "  ".to_string(),
                password: secret("secret"),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn register_opens_session() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let handler = RegisterHandler::new(
            Arc::new(MockAuthGateway::new("maria@example.com", "secret")),
            store.clone(),
        );

        let claims = handler
            .handle(RegisterCommand {
                name: "João".to_string(),
                email: "joao@example.com".to_string(),
                password: secret("pw"),
            })
            .await
            .unwrap();

        assert_eq!(claims.name.as_deref(), Some("João"));
        assert!(SessionStore::new(store).load().await.is_some());
    }

    #[tokio::test]
    async fn duplicate_registration_surfaces_message() {
        let handler = RegisterHandler::new(
            Arc::new(MockAuthGateway::new("maria@example.com", "secret")),
            Arc::new(InMemoryKeyValueStore::new()),
        );

        let err = handler
            .handle(RegisterCommand {
                name: "Maria".to_string(),
                email: "maria@example.com".to_string(),
                password: secret("pw"),
            })
            .await
            .unwrap_err();

        assert_eq!(err.message(), "User already exists");
    }
}
