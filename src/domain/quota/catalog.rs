//! Combined plan and action tables consulted by the ledger.

use serde::{Deserialize, Serialize};

use super::{ActionCatalog, Allotment, PlanCatalog, PlanId, RequestedAction};

/// Product configuration for the quota ledger.
///
/// Not persisted: changing it takes effect at the next reset or upgrade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaCatalog {
    pub plans: PlanCatalog,
    pub actions: ActionCatalog,
    pub default_plan: PlanId,
}

impl QuotaCatalog {
    pub fn new(plans: PlanCatalog, actions: ActionCatalog) -> Self {
        Self {
            plans,
            actions,
            default_plan: PlanId::default(),
        }
    }

    pub fn allotment(&self, plan: PlanId) -> Allotment {
        self.plans.allotment(plan)
    }

    pub fn cost_of(&self, action: &RequestedAction) -> u32 {
        self.actions.cost_of(action)
    }
}
