//! Quota-gated actions and their costs.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// An action the workspace gates through the quota ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionId {
    #[serde(rename = "save-contract")]
    SaveContract,
    #[serde(rename = "load-contract")]
    LoadContract,
    #[serde(rename = "apply-template")]
    ApplyTemplate,
    #[serde(rename = "export-pdf")]
    ExportPdf,
}

impl ActionId {
    pub const ALL: [ActionId; 4] = [
        ActionId::SaveContract,
        ActionId::LoadContract,
        ActionId::ApplyTemplate,
        ActionId::ExportPdf,
    ];

    /// Returns the stable lookup key.
    pub fn key(&self) -> &'static str {
        match self {
            ActionId::SaveContract => "save-contract",
            ActionId::LoadContract => "load-contract",
            ActionId::ApplyTemplate => "apply-template",
            ActionId::ExportPdf => "export-pdf",
        }
    }

    /// Returns the display name for this action.
    pub fn display_name(&self) -> &'static str {
        match self {
            ActionId::SaveContract => "Save contract",
            ActionId::LoadContract => "Load contract",
            ActionId::ApplyTemplate => "Apply template",
            ActionId::ExportPdf => "Export PDF",
        }
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for ActionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionId::ALL
            .into_iter()
            .find(|action| action.key() == s)
            .ok_or_else(|| ValidationError::unknown_identifier("action", s))
    }
}

/// An action as requested by a caller, which may name something outside
/// the catalog.
///
/// Unknown actions cost nothing and are always allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RequestedAction {
    Known(ActionId),
    Unknown(String),
}

impl RequestedAction {
    /// Returns the key the caller used.
    pub fn key(&self) -> &str {
        match self {
            RequestedAction::Known(action) => action.key(),
            RequestedAction::Unknown(key) => key,
        }
    }

    /// Returns the catalog action, if any.
    pub fn known(&self) -> Option<ActionId> {
        match self {
            RequestedAction::Known(action) => Some(*action),
            RequestedAction::Unknown(_) => None,
        }
    }
}

impl From<ActionId> for RequestedAction {
    fn from(action: ActionId) -> Self {
        RequestedAction::Known(action)
    }
}

impl From<&str> for RequestedAction {
    fn from(key: &str) -> Self {
        key.parse::<ActionId>()
            .map(RequestedAction::Known)
            .unwrap_or_else(|_| RequestedAction::Unknown(key.to_string()))
    }
}

impl From<String> for RequestedAction {
    fn from(key: String) -> Self {
        RequestedAction::from(key.as_str())
    }
}

impl std::fmt::Display for RequestedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Cost table for every catalog action.
///
/// | Action | Cost |
/// |--------|------|
/// | save-contract | 0 |
/// | load-contract | 0 |
/// | apply-template | 0 |
/// | export-pdf | 10 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCatalog {
    pub save_contract: u32,
    pub load_contract: u32,
    pub apply_template: u32,
    pub export_pdf: u32,
}

impl ActionCatalog {
    /// Returns the catalog with a different export cost.
    pub fn with_export_cost(mut self, cost: u32) -> Self {
        self.export_pdf = cost;
        self
    }

    /// Cost of a catalog action.
    pub fn cost(&self, action: ActionId) -> u32 {
        match action {
            ActionId::SaveContract => self.save_contract,
            ActionId::LoadContract => self.load_contract,
            ActionId::ApplyTemplate => self.apply_template,
            ActionId::ExportPdf => self.export_pdf,
        }
    }

    /// Cost of a requested action; unknown keys cost zero.
    pub fn cost_of(&self, requested: &RequestedAction) -> u32 {
        match requested {
            RequestedAction::Known(action) => self.cost(*action),
            RequestedAction::Unknown(_) => 0,
        }
    }
}

impl Default for ActionCatalog {
    fn default() -> Self {
        Self {
            save_contract: 0,
            load_contract: 0,
            apply_template: 0,
            export_pdf: 10,
        }
    }
}
