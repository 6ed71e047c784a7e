//! Results of ledger operations as seen by callers.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::PeriodKey;

use super::{ActionId, Allotment, PlanId};

/// An action refused for lack of quota, awaiting a plan upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    pub action: ActionId,
    pub cost: u32,
    pub remaining: u32,
    pub plan: PlanId,
}

/// Result of [`QuotaLedger::consume`](crate::application::QuotaLedger::consume).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsumeOutcome {
    /// The debit was applied.
    Consumed { cost: u32, remaining: u32 },
    /// Nothing was debited; the caller should offer a plan upgrade.
    UpgradeRequired(PendingAction),
}

impl ConsumeOutcome {
    pub fn is_consumed(&self) -> bool {
        matches!(self, ConsumeOutcome::Consumed { .. })
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        match self {
            ConsumeOutcome::Consumed { .. } => None,
            ConsumeOutcome::UpgradeRequired(pending) => Some(pending),
        }
    }
}

/// Read-only view of the ledger for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaSnapshot {
    pub remaining: u32,
    pub plan_id: PlanId,
    pub allotment: Allotment,
    pub period_key: PeriodKey,
}

impl QuotaSnapshot {
    /// Balance at or below which the balance is shown as running low.
    pub const LOW_BALANCE_THRESHOLD: u32 = 3;

    pub fn is_low(&self) -> bool {
        !self.allotment.is_unlimited() && self.remaining <= Self::LOW_BALANCE_THRESHOLD
    }

    /// Remaining balance formatted for display; unlimited plans show `∞`.
    pub fn remaining_label(&self) -> String {
        if self.allotment.is_unlimited() {
            "∞".to_string()
        } else {
            self.remaining.to_string()
        }
    }
}
