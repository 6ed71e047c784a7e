//! Payment configuration

use serde::Deserialize;

use crate::domain::quota::PlanPricing;

use super::error::ValidationError;

/// Checkout prices for paid plans
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// ISO 4217 currency code
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_basic_price")]
    pub basic_price_cents: u64,

    #[serde(default = "default_pro_price")]
    pub pro_price_cents: u64,

    #[serde(default = "default_unlimited_price")]
    pub unlimited_price_cents: u64,
}

impl PaymentConfig {
    pub fn to_pricing(&self) -> PlanPricing {
        PlanPricing {
            currency: self.currency.clone(),
            basic_cents: self.basic_price_cents,
            pro_cents: self.pro_price_cents,
            unlimited_cents: self.unlimited_price_cents,
        }
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let code_ok =
            self.currency.len() == 3 && self.currency.chars().all(|c| c.is_ascii_uppercase());
        if !code_ok {
            return Err(ValidationError::InvalidCurrency(self.currency.clone()));
        }
        if self.basic_price_cents == 0
            || self.pro_price_cents == 0
            || self.unlimited_price_cents == 0
        {
            return Err(ValidationError::InvalidPrice);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            basic_price_cents: default_basic_price(),
            pro_price_cents: default_pro_price(),
            unlimited_price_cents: default_unlimited_price(),
        }
    }
}

fn default_currency() -> String {
    "BRL".to_string()
}

fn default_basic_price() -> u64 {
    1990
}

fn default_pro_price() -> u64 {
    4990
}

fn default_unlimited_price() -> u64 {
    9990
}
