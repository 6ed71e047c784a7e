//! Plan prices for checkout.
//!
//! Money is held in integer cents; conversion to the provider's decimal
//! representation happens at the HTTP boundary.

use serde::{Deserialize, Serialize};

use super::PlanId;

/// Monthly price of each paid plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanPricing {
    /// ISO 4217 currency code.
    pub currency: String,
    pub basic_cents: u64,
    pub pro_cents: u64,
    pub unlimited_cents: u64,
}

impl PlanPricing {
    /// Price of `plan` in cents; the free plan costs nothing.
    pub fn price_cents(&self, plan: PlanId) -> u64 {
        match plan {
            PlanId::Free => 0,
            PlanId::Basic => self.basic_cents,
            PlanId::Pro => self.pro_cents,
            PlanId::Unlimited => self.unlimited_cents,
        }
    }

    /// Line-item title shown on the checkout page.
    pub fn checkout_title(&self, plan: PlanId) -> String {
        format!("{} plan", plan.display_name())
    }
}

impl Default for PlanPricing {
    fn default() -> Self {
        Self {
            currency: "BRL".to_string(),
            basic_cents: 1990,
            pro_cents: 4990,
            unlimited_cents: 9990,
        }
    }
}
