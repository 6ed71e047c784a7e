//! Result of a quota-gated action.

use crate::domain::quota::PendingAction;

/// Either the action ran, or the ledger refused it and nothing changed.
#[derive(Debug, Clone, PartialEq)]
pub enum Gated<T> {
    Completed(T),
    /// The caller should offer a plan upgrade.
    UpgradeRequired(PendingAction),
}

impl<T> Gated<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Gated::Completed(_))
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Gated::Completed(value) => Some(value),
            Gated::UpgradeRequired(_) => None,
        }
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        match self {
            Gated::Completed(_) => None,
            Gated::UpgradeRequired(pending) => Some(pending),
        }
    }
}
