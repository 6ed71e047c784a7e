//! Per-plan daily allotments.
//!
//! Defines how many quota units each plan receives per calendar day.

use serde::{Deserialize, Serialize};

use super::PlanId;

/// Daily quota allotment for a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Allotment {
    /// A finite number of units per day.
    Limited(u32),
    /// Never exhausted.
    Unlimited,
}

impl Allotment {
    /// Balance stored for an unlimited plan.
    ///
    /// Debits still apply to it, but no realistic usage drains it and
    /// [`Allotment::covers`] never consults it.
    pub const UNLIMITED_SENTINEL: u32 = u32::MAX;

    /// Returns the balance a fresh period starts with.
    pub fn full_balance(&self) -> u32 {
        match self {
            Allotment::Limited(units) => *units,
            Allotment::Unlimited => Self::UNLIMITED_SENTINEL,
        }
    }

    /// Returns true if `remaining` can pay for `cost` under this allotment.
    pub fn covers(&self, remaining: u32, cost: u32) -> bool {
        match self {
            Allotment::Limited(_) => remaining >= cost,
            Allotment::Unlimited => true,
        }
    }

    /// Returns true for the unlimited allotment.
    pub fn is_unlimited(&self) -> bool {
        matches!(self, Allotment::Unlimited)
    }
}

impl std::fmt::Display for Allotment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Allotment::Limited(units) => write!(f, "{}", units),
            Allotment::Unlimited => write!(f, "unlimited"),
        }
    }
}

/// Allotment table for the finite plans.
///
/// | Plan | Units/day |
/// |------|-----------|
/// | Free | 10 |
/// | Basic | 50 |
/// | Pro | 200 |
/// | Unlimited | sentinel |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanCatalog {
    pub free: u32,
    pub basic: u32,
    pub pro: u32,
}

impl PlanCatalog {
    /// Creates a catalog with explicit finite allotments.
    pub fn new(free: u32, basic: u32, pro: u32) -> Self {
        Self { free, basic, pro }
    }

    /// Get the allotment for a specific plan.
    pub fn allotment(&self, plan: PlanId) -> Allotment {
        match plan {
            PlanId::Free => Allotment::Limited(self.free),
            PlanId::Basic => Allotment::Limited(self.basic),
            PlanId::Pro => Allotment::Limited(self.pro),
            PlanId::Unlimited => Allotment::Unlimited,
        }
    }
}

impl Default for PlanCatalog {
    fn default() -> Self {
        Self::new(10, 50, 200)
    }
}
