//! Wire types for the backend's JSON API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ResetPasswordRequest<'a> {
    pub email: &'a str,
    pub new_password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreatePreferenceRequest<'a> {
    pub plan_id: &'a str,
    pub title: &'a str,
    /// Major currency units, as the provider expects (`19.9` for R$ 19,90).
    pub unit_price: f64,
    pub currency: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PreferenceResponse {
    pub id: String,
    #[serde(alias = "init_point")]
    pub init_point: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct VerifyResponse {
    pub status: String,
}

/// Error body; the backend uses `msg`, some routes `message`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ErrorBody {
    pub msg: Option<String>,
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.msg.or(self.message).filter(|m| !m.trim().is_empty())
    }
}
