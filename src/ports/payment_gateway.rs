//! Payment gateway port for plan checkout.
//!
//! Checkout is hosted by the payment provider: we create a preference, send
//! the user to its redirect URL, and later look up the payment the provider
//! reports back.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::quota::PlanId;

use super::BackendError;

/// Creates checkout preferences and reports payment outcomes.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a hosted checkout for one plan purchase.
    async fn create_preference(
        &self,
        request: &PreferenceRequest,
    ) -> Result<PaymentPreference, BackendError>;

    /// Look up the status of a completed checkout.
    async fn payment_status(&self, payment_id: &str) -> Result<PaymentStatus, BackendError>;
}

/// One-item checkout for a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRequest {
    pub plan_id: PlanId,
    pub title: String,
    pub unit_price_cents: u64,
    pub currency: String,
}

/// Checkout created by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPreference {
    /// Provider's preference ID.
    pub id: String,

    /// URL the user completes payment at.
    pub init_point: String,
}

/// Payment status as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Approved,
    Pending,
    InProcess,
    Rejected,
    Cancelled,
    Refunded,
    /// Any status this client does not recognize.
    Other(String),
}

impl PaymentStatus {
    pub fn parse(status: &str) -> Self {
        match status.trim().to_ascii_lowercase().as_str() {
            "approved" => PaymentStatus::Approved,
            "pending" => PaymentStatus::Pending,
            "in_process" => PaymentStatus::InProcess,
            "rejected" => PaymentStatus::Rejected,
            "cancelled" => PaymentStatus::Cancelled,
            "refunded" => PaymentStatus::Refunded,
            _ => PaymentStatus::Other(status.to_string()),
        }
    }

    /// Only an approved payment grants the purchased plan.
    pub fn is_approved(&self) -> bool {
        matches!(self, PaymentStatus::Approved)
    }

    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Approved => "approved",
            PaymentStatus::Pending => "pending",
            PaymentStatus::InProcess => "in_process",
            PaymentStatus::Rejected => "rejected",
            PaymentStatus::Cancelled => "cancelled",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::Other(s) => s,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
