//! LoadContractHandler - Command handler for reopening a saved contract.

use std::sync::Arc;

use crate::application::handlers::Gated;
use crate::application::QuotaLedger;
use crate::domain::contract::{ContractHistory, SavedContract};
use crate::domain::foundation::{ContractId, DomainError, ErrorCode};
use crate::domain::quota::{ActionId, ConsumeOutcome};
use crate::ports::{KeyValueStore, PersistedSlot};

use super::history_slot;

/// Command to load a history entry.
#[derive(Debug, Clone)]
pub struct LoadContractCommand {
    pub contract_id: ContractId,
}

/// Handler for loading contracts.
pub struct LoadContractHandler {
    ledger: Arc<QuotaLedger>,
    history: PersistedSlot<ContractHistory>,
}

impl LoadContractHandler {
    pub fn new(ledger: Arc<QuotaLedger>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            ledger,
            history: history_slot(store),
        }
    }

    /// Missing entries fail before anything is debited.
    pub async fn handle(
        &self,
        cmd: LoadContractCommand,
    ) -> Result<Gated<SavedContract>, DomainError> {
        let history = self.history.load().await.unwrap_or_default();
        let saved = history.find(cmd.contract_id).cloned().ok_or_else(|| {
            DomainError::new(ErrorCode::ContractNotFound, "Contract not found in history")
                .with_detail("contract_id", cmd.contract_id.to_string())
        })?;

        if let ConsumeOutcome::UpgradeRequired(pending) =
            self.ledger.consume(ActionId::LoadContract).await
        {
            return Ok(Gated::UpgradeRequired(pending));
        }

        Ok(Gated::Completed(saved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryKeyValueStore;
    use crate::application::handlers::contract::test_support::{
        clock, contract, exhausted_ledger, ledger,
    };
    use crate::ports::Clock;

    async fn store_with_entry() -> (InMemoryKeyValueStore, SavedContract) {
        let store = InMemoryKeyValueStore::new();
        let mut history = ContractHistory::new();
        let saved = history.save(contract("ACME"), None, clock().now());
        history_slot(Arc::new(store.clone())).save(&history).await;
        (store, saved)
    }

    #[tokio::test]
    async fn loads_existing_entry() {
        let (store, saved) = store_with_entry().await;
        let handler = LoadContractHandler::new(ledger(&store).await, Arc::new(store));

        let loaded = handler
            .handle(LoadContractCommand {
                contract_id: saved.id,
            })
            .await
            .unwrap()
            .completed()
            .unwrap();

        assert_eq!(loaded, saved);
    }

    #[tokio::test]
    async fn missing_entry_is_not_found_and_not_debited() {
        let (store, _) = store_with_entry().await;
        let ledger = exhausted_ledger(&store).await;
        let handler = LoadContractHandler::new(ledger.clone(), Arc::new(store));

        let err = handler
            .handle(LoadContractCommand {
                contract_id: ContractId::new(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ContractNotFound);
        assert!(ledger.pending_action().await.is_none());
    }

    #[tokio::test]
    async fn refused_load_returns_pending() {
        let (store, saved) = store_with_entry().await;
        let handler = LoadContractHandler::new(exhausted_ledger(&store).await, Arc::new(store));

        let result = handler
            .handle(LoadContractCommand {
                contract_id: saved.id,
            })
            .await
            .unwrap();

        assert_eq!(result.pending().unwrap().action, ActionId::LoadContract);
    }
}
