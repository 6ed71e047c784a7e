//! SaveContractHandler - Command handler for saving a contract to history.

use std::sync::Arc;

use crate::application::handlers::Gated;
use crate::application::QuotaLedger;
use crate::domain::contract::{ContractData, ContractHistory, SavedContract};
use crate::domain::quota::{ActionId, ConsumeOutcome};
use crate::ports::{Clock, KeyValueStore, PersistedSlot};

use super::history_slot;

/// Command to save the current record.
#[derive(Debug, Clone)]
pub struct SaveContractCommand {
    pub data: ContractData,
    /// Overrides the client name as the entry's label.
    pub name: Option<String>,
}

/// Handler for saving contracts.
pub struct SaveContractHandler {
    ledger: Arc<QuotaLedger>,
    history: PersistedSlot<ContractHistory>,
    clock: Arc<dyn Clock>,
}

impl SaveContractHandler {
    pub fn new(
        ledger: Arc<QuotaLedger>,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            ledger,
            history: history_slot(store),
            clock,
        }
    }

    pub async fn handle(&self, cmd: SaveContractCommand) -> Gated<SavedContract> {
        if let ConsumeOutcome::UpgradeRequired(pending) =
            self.ledger.consume(ActionId::SaveContract).await
        {
            return Gated::UpgradeRequired(pending);
        }

        let mut history = self.history.load().await.unwrap_or_default();
        let saved = history.save(cmd.data, cmd.name.as_deref(), self.clock.now());
        self.history.save(&history).await;

        tracing::debug!(contract_id = %saved.id, name = %saved.name, "Saved contract");
        Gated::Completed(saved)
    }
}
