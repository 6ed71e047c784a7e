//! HTTP adapter for the backend's auth and payment endpoints.
//!
//! Implements both `AuthGateway` and `PaymentGateway` against one base URL.
//! Requests are not retried: a failure is reported once and the user decides
//! whether to try again.
//!
//! # Example
//!
//! ```ignore
//! let client = HttpBackendClient::new("http://localhost:5000", Duration::from_secs(10))?;
//! let token = client.login(&Credentials::new("maria@example.com", "secret")).await?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::ports::{
    AuthGateway, BackendError, BackendErrorCode, Credentials, PasswordReset, PaymentGateway,
    PaymentPreference, PaymentStatus, PreferenceRequest, Registration, SessionToken,
};

use super::dto::{
    CreatePreferenceRequest, ErrorBody, LoginRequest, PreferenceResponse, RegisterRequest,
    ResetPasswordRequest, TokenResponse, VerifyResponse,
};

const LOGIN_FAILED: &str = "Invalid credentials";
const REGISTER_FAILED: &str = "Registration failed";

/// Backend HTTP client.
#[derive(Debug, Clone)]
pub struct HttpBackendClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpBackendClient {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request; non-2xx responses become `Rejected` errors.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        operation: &'static str,
        fallback_message: &str,
    ) -> Result<reqwest::Response, BackendError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Backend unreachable");
            BackendError::network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| fallback_message.to_string());

        tracing::warn!(
            operation,
            status = status.as_u16(),
            message = %message,
            "Backend rejected request"
        );
        Err(BackendError::rejected(status.as_u16(), message))
    }

    async fn decode<R: DeserializeOwned>(
        response: reqwest::Response,
        operation: &'static str,
    ) -> Result<R, BackendError> {
        response.json::<R>().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Failed to parse backend response");
            BackendError::invalid_response(format!("Failed to parse backend response: {}", e))
        })
    }

    async fn post_json<B, R>(
        &self,
        path: &str,
        body: &B,
        operation: &'static str,
        fallback_message: &str,
    ) -> Result<R, BackendError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.http_client.post(self.url(path)).json(body);
        let response = self.send(request, operation, fallback_message).await?;
        Self::decode(response, operation).await
    }

    fn session_from(response: TokenResponse) -> Result<SessionToken, BackendError> {
        response
            .token
            .filter(|t| !t.is_empty())
            .map(SessionToken::new)
            .ok_or_else(|| BackendError::invalid_response("Response did not include a token"))
    }
}

#[async_trait]
impl AuthGateway for HttpBackendClient {
    async fn login(&self, credentials: &Credentials) -> Result<SessionToken, BackendError> {
        let body = LoginRequest {
            email: &credentials.email,
            password: credentials.password.expose_secret(),
        };

        let response: TokenResponse = self
            .post_json("/api/auth/login", &body, "login", LOGIN_FAILED)
            .await?;

        tracing::debug!(email = %credentials.email, "Signed in");
        Self::session_from(response)
    }

    async fn register(&self, registration: &Registration) -> Result<SessionToken, BackendError> {
        let body = RegisterRequest {
            name: &registration.name,
            email: &registration.email,
            password: registration.password.expose_secret(),
        };

        let response: TokenResponse = self
            .post_json("/api/auth/register", &body, "register", REGISTER_FAILED)
            .await?;

        tracing::debug!(email = %registration.email, "Registered");
        Self::session_from(response)
    }

    async fn reset_password(&self, reset: &PasswordReset) -> Result<(), BackendError> {
        let body = ResetPasswordRequest {
            email: &reset.email,
            new_password: reset.new_password.expose_secret(),
        };

        let request = self
            .http_client
            .post(self.url("/api/auth/reset-password"))
            .json(&body);
        self.send(request, "reset_password", BackendError::GENERIC_MESSAGE)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl PaymentGateway for HttpBackendClient {
    async fn create_preference(
        &self,
        request: &PreferenceRequest,
    ) -> Result<PaymentPreference, BackendError> {
        let body = CreatePreferenceRequest {
            plan_id: request.plan_id.as_str(),
            title: &request.title,
            unit_price: request.unit_price_cents as f64 / 100.0,
            currency: &request.currency,
        };

        let response: PreferenceResponse = self
            .post_json(
                "/api/payment/create-preference",
                &body,
                "create_preference",
                BackendError::GENERIC_MESSAGE,
            )
            .await?;

        tracing::info!(
            plan = %request.plan_id,
            preference_id = %response.id,
            "Created payment preference"
        );
        Ok(PaymentPreference {
            id: response.id,
            init_point: response.init_point,
        })
    }

    async fn payment_status(&self, payment_id: &str) -> Result<PaymentStatus, BackendError> {
        let payment_id = payment_id.trim();
        let valid = !payment_id.is_empty()
            && payment_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(BackendError::new(
                BackendErrorCode::Rejected,
                "Invalid payment id",
            ));
        }

        let request = self
            .http_client
            .get(self.url(&format!("/api/payment/verify/{}", payment_id)));
        let response = self
            .send(request, "payment_status", BackendError::GENERIC_MESSAGE)
            .await?;
        let body: VerifyResponse = Self::decode(response, "payment_status").await?;

        Ok(PaymentStatus::parse(&body.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quota::PlanId;
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> HttpBackendClient {
        HttpBackendClient::new(server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn login_returns_session_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({"email": "maria@example.com", "password": "secret"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc.def.ghi"})))
            .mount(&server)
            .await;

        let token = client(&server)
            .login(&Credentials::new("maria@example.com", "secret"))
            .await
            .unwrap();

        assert_eq!(token.expose(), "abc.def.ghi");
    }

    #[tokio::test]
    async fn login_rejection_surfaces_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"msg": "User not found"})),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .login(&Credentials::new("nobody@example.com", "x"))
            .await
            .unwrap_err();

        assert_eq!(err.code, BackendErrorCode::Rejected);
        assert_eq!(err.status, Some(400));
        assert_eq!(err.user_message(), "User not found");
    }

    #[tokio::test]
    async fn login_rejection_without_body_uses_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client(&server)
            .login(&Credentials::new("maria@example.com", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), LOGIN_FAILED);
    }

    #[tokio::test]
    async fn success_without_token_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let registration = Registration {
            name: "Maria".to_string(),
            email: "maria@example.com".to_string(),
            password: SecretString::new("secret".to_string()),
        };
        let err = client(&server).register(&registration).await.unwrap_err();

        assert_eq!(err.code, BackendErrorCode::InvalidResponse);
    }

    #[tokio::test]
    async fn reset_password_sends_camel_case_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/reset-password"))
            .and(body_json(json!({"email": "maria@example.com", "newPassword": "n3w"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let reset = PasswordReset {
            email: "maria@example.com".to_string(),
            new_password: SecretString::new("n3w".to_string()),
        };
        client(&server).reset_password(&reset).await.unwrap();
    }

    #[tokio::test]
    async fn create_preference_sends_major_units() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/payment/create-preference"))
            .and(body_json(json!({
                "planId": "pro",
                "title": "Pro plan",
                "unitPrice": 49.9,
                "currency": "BRL"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "pref-123",
                "initPoint": "https://checkout.example.com/pref-123"
            })))
            .mount(&server)
            .await;

        let preference = client(&server)
            .create_preference(&PreferenceRequest {
                plan_id: PlanId::Pro,
                title: "Pro plan".to_string(),
                unit_price_cents: 4990,
                currency: "BRL".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(preference.id, "pref-123");
        assert_eq!(preference.init_point, "https://checkout.example.com/pref-123");
    }

    #[tokio::test]
    async fn payment_status_parses_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/payment/verify/987654"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "approved"})))
            .mount(&server)
            .await;

        let status = client(&server).payment_status("987654").await.unwrap();
        assert!(status.is_approved());
    }

    #[tokio::test]
    async fn payment_status_server_error_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/payment/verify/1"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client(&server).payment_status("1").await.unwrap_err();
        assert_eq!(err.code, BackendErrorCode::Rejected);
        assert_eq!(err.status, Some(500));
    }

    #[tokio::test]
    async fn payment_status_rejects_path_like_ids() {
        let server = MockServer::start().await;
        let err = client(&server).payment_status("../admin").await.unwrap_err();
        assert_eq!(err.code, BackendErrorCode::Rejected);
    }

    #[tokio::test]
    async fn unreachable_backend_is_network_error() {
        let client = HttpBackendClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let err = client
            .login(&Credentials::new("maria@example.com", "secret"))
            .await
            .unwrap_err();

        assert_eq!(err.code, BackendErrorCode::NetworkError);
        assert_eq!(err.user_message(), BackendError::GENERIC_MESSAGE);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client =
            HttpBackendClient::new("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }
}
