//! QuotaState - the persisted balance record.
//!
//! Wire shape: `{ "remaining": 10, "periodKey": "2026-10-19", "planId": "free" }`.
//! `remaining` is unsigned, so a negative persisted value fails to parse and
//! is treated like any other corrupt record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::PeriodKey;

use super::{Allotment, InsufficientQuota, PlanCatalog, PlanId};

/// Remaining balance of one subscriber for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaState {
    remaining: u32,
    period_key: PeriodKey,
    plan_id: PlanId,
}

impl QuotaState {
    /// A full balance for `plan` starting on `today`.
    pub fn fresh(plan: PlanId, today: PeriodKey, plans: &PlanCatalog) -> Self {
        Self {
            remaining: plans.allotment(plan).full_balance(),
            period_key: today,
            plan_id: plan,
        }
    }

    /// Reconstitutes a record from stored fields.
    pub fn reconstitute(remaining: u32, period_key: PeriodKey, plan_id: PlanId) -> Self {
        Self {
            remaining,
            period_key,
            plan_id,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn period_key(&self) -> PeriodKey {
        self.period_key
    }

    pub fn plan_id(&self) -> PlanId {
        self.plan_id
    }

    /// Returns true if the balance was computed for a different day.
    pub fn is_stale(&self, today: PeriodKey) -> bool {
        !self.period_key.is_same_day(&today)
    }

    /// Refills the balance if the day changed. Returns true if it did.
    ///
    /// Any unspent balance from the previous period is discarded.
    pub fn reset_if_stale(&mut self, today: PeriodKey, plans: &PlanCatalog) -> bool {
        if !self.is_stale(today) {
            return false;
        }
        self.remaining = plans.allotment(self.plan_id).full_balance();
        self.period_key = today;
        true
    }

    /// Debits `cost` if `allotment` covers it, returning the new balance.
    ///
    /// On refusal the record is left untouched.
    pub fn try_debit(&mut self, cost: u32, allotment: Allotment) -> Result<u32, InsufficientQuota> {
        if !allotment.covers(self.remaining, cost) {
            return Err(InsufficientQuota {
                required: cost,
                remaining: self.remaining,
            });
        }
        self.remaining = self.remaining.saturating_sub(cost);
        Ok(self.remaining)
    }

    /// Switches plan, refilling to the new allotment starting `today`.
    pub fn upgrade(&mut self, plan: PlanId, today: PeriodKey, plans: &PlanCatalog) {
        *self = Self::fresh(plan, today, plans);
    }
}
