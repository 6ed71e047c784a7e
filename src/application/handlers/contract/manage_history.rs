//! History management - ungated commands and queries over saved contracts.

use std::sync::Arc;

use crate::domain::contract::{ContractHistory, SavedContract};
use crate::domain::foundation::ContractId;
use crate::ports::{KeyValueStore, PersistedSlot};

use super::history_slot;

/// Query handler listing saved contracts, newest first.
pub struct ListContractsHandler {
    history: PersistedSlot<ContractHistory>,
}

impl ListContractsHandler {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            history: history_slot(store),
        }
    }

    /// A missing or corrupt history reads as empty.
    pub async fn handle(&self) -> Vec<SavedContract> {
        self.history
            .load()
            .await
            .map(|history| history.entries().to_vec())
            .unwrap_or_default()
    }
}

/// Command to delete one history entry.
#[derive(Debug, Clone)]
pub struct DeleteContractCommand {
    pub contract_id: ContractId,
}

/// Handler for deleting history entries.
pub struct DeleteContractHandler {
    history: PersistedSlot<ContractHistory>,
}

impl DeleteContractHandler {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            history: history_slot(store),
        }
    }

    /// Returns true if the entry existed.
    pub async fn handle(&self, cmd: DeleteContractCommand) -> bool {
        let mut history = self.history.load().await.unwrap_or_default();
        if !history.delete(cmd.contract_id) {
            return false;
        }
        self.history.save(&history).await;
        true
    }
}

/// Handler removing the whole history.
pub struct ClearHistoryHandler {
    history: PersistedSlot<ContractHistory>,
}

impl ClearHistoryHandler {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            history: history_slot(store),
        }
    }

    pub async fn handle(&self) {
        self.history.clear().await;
        tracing::info!("Cleared contract history");
    }
}
