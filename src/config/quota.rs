//! Quota configuration

use std::time::Duration;

use serde::Deserialize;

use crate::domain::quota::{ActionCatalog, PlanCatalog, QuotaCatalog};

use super::error::ValidationError;

/// Plan allotments, action costs and the reset check cadence
#[derive(Debug, Clone, Deserialize)]
pub struct QuotaConfig {
    /// How often `watch` checks for a day change
    #[serde(default = "default_reset_interval")]
    pub reset_check_interval_secs: u64,

    #[serde(default = "default_free_allotment")]
    pub free_allotment: u32,

    #[serde(default = "default_basic_allotment")]
    pub basic_allotment: u32,

    #[serde(default = "default_pro_allotment")]
    pub pro_allotment: u32,

    /// Cost of one PDF export
    #[serde(default = "default_export_cost")]
    pub export_cost: u32,
}

impl QuotaConfig {
    pub fn reset_check_interval(&self) -> Duration {
        Duration::from_secs(self.reset_check_interval_secs)
    }

    /// Build the ledger catalog from the configured tables
    pub fn to_catalog(&self) -> QuotaCatalog {
        QuotaCatalog::new(
            PlanCatalog::new(self.free_allotment, self.basic_allotment, self.pro_allotment),
            ActionCatalog::default().with_export_cost(self.export_cost),
        )
    }

    /// Validate quota configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.reset_check_interval_secs == 0 {
            return Err(ValidationError::InvalidResetInterval);
        }
        if self.free_allotment > self.basic_allotment || self.basic_allotment > self.pro_allotment {
            return Err(ValidationError::AllotmentOrder);
        }
        Ok(())
    }
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            reset_check_interval_secs: default_reset_interval(),
            free_allotment: default_free_allotment(),
            basic_allotment: default_basic_allotment(),
            pro_allotment: default_pro_allotment(),
            export_cost: default_export_cost(),
        }
    }
}

fn default_reset_interval() -> u64 {
    60
}

fn default_free_allotment() -> u32 {
    10
}

fn default_basic_allotment() -> u32 {
    50
}

fn default_pro_allotment() -> u32 {
    200
}

fn default_export_cost() -> u32 {
    10
}
