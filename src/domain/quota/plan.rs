//! Subscription plan identifiers.
//!
//! Represents the closed set of plans a subscriber can hold.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Subscription plan.
///
/// Determines the per-day allotment of quota units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanId {
    /// Default plan for every new subscriber.
    #[default]
    Free,

    /// Entry paid plan.
    Basic,

    /// Professional plan.
    Pro,

    /// No daily limit.
    Unlimited,
}

impl PlanId {
    /// Every plan, in ascending rank.
    pub const ALL: [PlanId; 4] = [PlanId::Free, PlanId::Basic, PlanId::Pro, PlanId::Unlimited];

    /// Returns the stable wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanId::Free => "free",
            PlanId::Basic => "basic",
            PlanId::Pro => "pro",
            PlanId::Unlimited => "unlimited",
        }
    }

    /// Returns true if this plan requires payment.
    pub fn is_paid(&self) -> bool {
        !matches!(self, PlanId::Free)
    }

    /// Returns the display name for this plan.
    pub fn display_name(&self) -> &'static str {
        match self {
            PlanId::Free => "Free",
            PlanId::Basic => "Basic",
            PlanId::Pro => "Pro",
            PlanId::Unlimited => "Unlimited",
        }
    }

    /// Returns the numeric rank of this plan for comparison.
    pub fn rank(&self) -> u8 {
        match self {
            PlanId::Free => 0,
            PlanId::Basic => 1,
            PlanId::Pro => 2,
            PlanId::Unlimited => 3,
        }
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlanId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlanId::ALL
            .into_iter()
            .find(|plan| plan.as_str() == s)
            .ok_or_else(|| ValidationError::unknown_identifier("plan", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_plan_is_default_and_not_paid() {
        assert_eq!(PlanId::default(), PlanId::Free);
        assert!(!PlanId::Free.is_paid());
    }

    #[test]
    fn other_plans_are_paid() {
        assert!(PlanId::Basic.is_paid());
        assert!(PlanId::Pro.is_paid());
        assert!(PlanId::Unlimited.is_paid());
    }

    #[test]
    fn ranks_ascend_in_catalog_order() {
        let ranks: Vec<u8> = PlanId::ALL.iter().map(PlanId::rank).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
    }

    #[test]
    fn parses_every_wire_identifier() {
        for plan in PlanId::ALL {
            assert_eq!(plan.as_str().parse::<PlanId>().unwrap(), plan);
        }
    }

    #[test]
    fn rejects_unknown_identifier() {
        let err = "enterprise".parse::<PlanId>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown plan 'enterprise'");
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("Pro".parse::<PlanId>().is_err());
    }

    #[test]
    fn plan_serializes_lowercase() {
        let json = serde_json::to_string(&PlanId::Unlimited).unwrap();
        assert_eq!(json, "\"unlimited\"");
    }

    #[test]
    fn plan_deserializes_from_lowercase() {
        let plan: PlanId = serde_json::from_str("\"basic\"").unwrap();
        assert_eq!(plan, PlanId::Basic);
    }
}
