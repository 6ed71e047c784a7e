//! Bounded, newest-first history of saved contracts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ContractId;

use super::ContractData;

/// A contract snapshot kept in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedContract {
    pub id: ContractId,
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub data: ContractData,
}

/// Saved contracts, newest first, capped at [`ContractHistory::MAX_ENTRIES`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractHistory {
    entries: Vec<SavedContract>,
}

impl ContractHistory {
    pub const MAX_ENTRIES: usize = 20;
    pub const UNTITLED: &'static str = "Contrato sem nome";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[SavedContract] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, id: ContractId) -> Option<&SavedContract> {
        self.entries.iter().find(|c| c.id == id)
    }

    /// Prepends a snapshot of `data`, dropping the oldest entries past the cap.
    ///
    /// The entry is named `custom_name`, else the client name, else
    /// [`ContractHistory::UNTITLED`].
    pub fn save(
        &mut self,
        data: ContractData,
        custom_name: Option<&str>,
        saved_at: DateTime<Utc>,
    ) -> SavedContract {
        let name = custom_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .or_else(|| Some(data.client.name.trim()).filter(|n| !n.is_empty()))
            .unwrap_or(Self::UNTITLED)
            .to_string();

        let saved = SavedContract {
            id: ContractId::new(),
            name,
            saved_at,
            data,
        };

        self.entries.insert(0, saved.clone());
        self.entries.truncate(Self::MAX_ENTRIES);
        saved
    }

    /// Removes an entry. Returns true if it existed.
    pub fn delete(&mut self, id: ContractId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|c| c.id != id);
        self.entries.len() != before
    }
}
