//! ConfirmPaymentHandler - Command handler for completing a plan checkout.
//!
//! After hosted checkout the provider redirects back with a payment ID. Only
//! an approved payment upgrades the ledger; any other status is reported and
//! the current plan stays.

use std::sync::Arc;

use crate::application::QuotaLedger;
use crate::domain::foundation::DomainError;
use crate::domain::quota::{PlanId, QuotaError, QuotaSnapshot};
use crate::ports::{PaymentGateway, PaymentStatus};

/// Command to confirm a checkout for `plan_id`.
#[derive(Debug, Clone)]
pub struct ConfirmPaymentCommand {
    pub payment_id: String,
    pub plan_id: String,
}

/// Result of payment confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmPaymentResult {
    Upgraded(QuotaSnapshot),
    NotApproved(PaymentStatus),
}

/// Handler for payment confirmation.
pub struct ConfirmPaymentHandler {
    ledger: Arc<QuotaLedger>,
    payment_gateway: Arc<dyn PaymentGateway>,
}

impl ConfirmPaymentHandler {
    pub fn new(ledger: Arc<QuotaLedger>, payment_gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            ledger,
            payment_gateway,
        }
    }

    pub async fn handle(
        &self,
        cmd: ConfirmPaymentCommand,
    ) -> Result<ConfirmPaymentResult, DomainError> {
        // 1. Resolve plan before calling out
        let plan: PlanId = cmd
            .plan_id
            .parse()
            .map_err(|e| DomainError::from(QuotaError::from(e)))?;

        // 2. Ask the provider
        let status = self.payment_gateway.payment_status(&cmd.payment_id).await?;

        if !status.is_approved() {
            tracing::info!(payment_id = %cmd.payment_id, status = %status, "Payment not approved");
            return Ok(ConfirmPaymentResult::NotApproved(status));
        }

        // 3. Apply the purchased plan
        let snapshot = self.ledger.upgrade_to(plan).await;
        tracing::info!(payment_id = %cmd.payment_id, plan = %plan, "Payment approved");
        Ok(ConfirmPaymentResult::Upgraded(snapshot))
    }
}
