//! Auth handlers.
//!
//! ## Commands
//! - Signing in and registering (stores the session token)
//! - Resetting a password
//! - Signing out
//!
//! ## Queries
//! - Current session claims

mod current_session;
mod reset_password;
mod sign_in;

pub use current_session::{CurrentSessionHandler, SignOutHandler};
pub use reset_password::{ResetPasswordCommand, ResetPasswordHandler};
pub use sign_in::{RegisterCommand, RegisterHandler, SignInCommand, SignInHandler};

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ports::{KeyValueStore, PersistedSlot, SessionToken};

/// Storage key of the session token.
pub const SESSION_KEY: &str = "auth-session:v1";

#[derive(Serialize, Deserialize)]
struct StoredSession {
    token: String,
}

/// Persisted session token.
#[derive(Clone)]
pub(crate) struct SessionStore {
    slot: PersistedSlot<StoredSession>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            slot: PersistedSlot::new(store, SESSION_KEY),
        }
    }

    pub async fn load(&self) -> Option<SessionToken> {
        self.slot
            .load()
            .await
            .filter(|s| !s.token.is_empty())
            .map(|s| SessionToken::new(s.token))
    }

    pub async fn save(&self, token: &SessionToken) {
        self.slot
            .save(&StoredSession {
                token: token.expose().to_string(),
            })
            .await;
    }

    pub async fn clear(&self) {
        self.slot.clear().await;
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use secrecy::ExposeSecret;
    use serde_json::json;
    use std::sync::Mutex;

    use crate::ports::{
        AuthGateway, BackendError, Credentials, PasswordReset, Registration, SessionToken,
    };

    pub fn token_for(name: &str, email: &str) -> String {
        encode(
            &Header::default(),
            &json!({"sub": "1", "name": name, "email": email}),
            &EncodingKey::from_secret(b"backend-secret"),
        )
        .unwrap()
    }

    /// Accepts one email/password pair.
    pub struct MockAuthGateway {
        pub email: String,
        pub password: String,
        pub resets: Mutex<Vec<String>>,
    }

    impl MockAuthGateway {
        pub fn new(email: &str, password: &str) -> Self {
            Self {
                email: email.to_string(),
                password: password.to_string(),
                resets: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AuthGateway for MockAuthGateway {
        async fn login(&self, credentials: &Credentials) -> Result<SessionToken, BackendError> {
            if credentials.email == self.email
                && credentials.password.expose_secret() == &self.password
            {
                Ok(SessionToken::new(token_for("Maria", &self.email)))
            } else {
                Err(BackendError::rejected(400, "Invalid credentials"))
            }
        }

        async fn register(
            &self,
            registration: &Registration,
        ) -> Result<SessionToken, BackendError> {
            if registration.email == self.email {
                return Err(BackendError::rejected(400, "User already exists"));
            }
            Ok(SessionToken::new(token_for(
                &registration.name,
                &registration.email,
            )))
        }

        async fn reset_password(&self, reset: &PasswordReset) -> Result<(), BackendError> {
            if reset.email != self.email {
                return Err(BackendError::rejected(404, "User not found"));
            }
            self.resets.lock().unwrap().push(reset.email.clone());
            Ok(())
        }
    }
}
