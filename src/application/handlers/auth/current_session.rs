//! Session queries and sign-out.

use std::sync::Arc;

use crate::ports::{KeyValueStore, SessionClaims};

use super::SessionStore;

/// Query handler for the signed-in user.
pub struct CurrentSessionHandler {
    session: SessionStore,
}

impl CurrentSessionHandler {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            session: SessionStore::new(store),
        }
    }

    /// `None` when signed out. A token without readable claims still counts
    /// as signed in, with empty claims.
    pub async fn handle(&self) -> Option<SessionClaims> {
        let token = self.session.load().await?;
        Some(token.claims().unwrap_or_default())
    }
}

/// Handler for signing out.
pub struct SignOutHandler {
    session: SessionStore,
}

impl SignOutHandler {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            session: SessionStore::new(store),
        }
    }

    pub async fn handle(&self) {
        self.session.clear().await;
        tracing::info!("Signed out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryKeyValueStore;
    use crate::application::handlers::auth::test_support::token_for;
    use crate::application::handlers::auth::SESSION_KEY;
    use crate::ports::SessionToken;

    #[tokio::test]
    async fn signed_out_has_no_session() {
        let handler = CurrentSessionHandler::new(Arc::new(InMemoryKeyValueStore::new()));
        assert_eq!(handler.handle().await, None);
    }

    #[tokio::test]
    async fn reads_claims_of_stored_token() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        SessionStore::new(store.clone())
            .save(&SessionToken::new(token_for("Maria", "maria@example.com")))
            .await;

        let claims = CurrentSessionHandler::new(store).handle().await.unwrap();
        assert_eq!(claims.name.as_deref(), Some("Maria"));
    }

    #[tokio::test]
    async fn opaque_token_counts_as_signed_in() {
        let store = Arc::new(InMemoryKeyValueStore::with_value(
            SESSION_KEY,
            r#"{"token": "opaque"}"#,
        ));

        let claims = CurrentSessionHandler::new(store).handle().await.unwrap();
        assert_eq!(claims, SessionClaims::default());
    }

    #[tokio::test]
    async fn sign_out_clears_session() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        SessionStore::new(store.clone())
            .save(&SessionToken::new("opaque"))
            .await;

        SignOutHandler::new(store.clone()).handle().await;

        assert_eq!(CurrentSessionHandler::new(store).handle().await, None);
    }
}
