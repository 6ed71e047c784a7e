//! SelectPlanHandler - Command handler for choosing a plan.
//!
//! The free plan applies immediately. Paid plans go through hosted checkout:
//! the handler creates a payment preference and hands back its redirect URL,
//! leaving the ledger untouched until the payment is confirmed.

use std::sync::Arc;

use crate::application::QuotaLedger;
use crate::domain::foundation::DomainError;
use crate::domain::quota::{PlanId, PlanPricing, QuotaError, QuotaSnapshot};
use crate::ports::{PaymentGateway, PaymentPreference, PreferenceRequest};

/// Command to select a plan by identifier.
#[derive(Debug, Clone)]
pub struct SelectPlanCommand {
    pub plan_id: String,
}

/// Result of plan selection.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectPlanResult {
    /// Plan applied without payment.
    Activated(QuotaSnapshot),
    /// Payment required; send the user to `preference.init_point`.
    CheckoutStarted {
        plan: PlanId,
        price_cents: u64,
        preference: PaymentPreference,
    },
}

/// Handler for plan selection.
pub struct SelectPlanHandler {
    ledger: Arc<QuotaLedger>,
    payment_gateway: Arc<dyn PaymentGateway>,
    pricing: PlanPricing,
}

impl SelectPlanHandler {
    pub fn new(
        ledger: Arc<QuotaLedger>,
        payment_gateway: Arc<dyn PaymentGateway>,
        pricing: PlanPricing,
    ) -> Self {
        Self {
            ledger,
            payment_gateway,
            pricing,
        }
    }

    pub async fn handle(&self, cmd: SelectPlanCommand) -> Result<SelectPlanResult, DomainError> {
        // 1. Resolve plan
        let plan: PlanId = cmd
            .plan_id
            .parse()
            .map_err(|e| DomainError::from(QuotaError::from(e)))?;

        // 2. Free plan applies directly
        if !plan.is_paid() {
            let snapshot = self.ledger.upgrade_to(plan).await;
            return Ok(SelectPlanResult::Activated(snapshot));
        }

        // 3. Paid plan: create checkout
        let price_cents = self.pricing.price_cents(plan);
        let preference = self
            .payment_gateway
            .create_preference(&PreferenceRequest {
                plan_id: plan,
                title: self.pricing.checkout_title(plan),
                unit_price_cents: price_cents,
                currency: self.pricing.currency.clone(),
            })
            .await?;

        Ok(SelectPlanResult::CheckoutStarted {
            plan,
            price_cents,
            preference,
        })
    }
}
