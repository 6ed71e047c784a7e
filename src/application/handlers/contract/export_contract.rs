//! ExportContractHandler - Command handler for exporting a document.
//!
//! Rendering happens outside this crate; the handler gates the export, names
//! the file and spells out the price for the document body.

use std::sync::Arc;

use crate::application::handlers::Gated;
use crate::application::QuotaLedger;
use crate::domain::contract::ContractData;
use crate::domain::quota::{ActionId, ConsumeOutcome};

/// Command to export the current record.
#[derive(Debug, Clone)]
pub struct ExportContractCommand {
    pub data: ContractData,
}

/// Export go-ahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportContractResult {
    pub file_name: String,
    pub price_in_words: String,
    pub cost: u32,
    pub remaining: u32,
}

/// Handler for document export.
pub struct ExportContractHandler {
    ledger: Arc<QuotaLedger>,
}

impl ExportContractHandler {
    pub fn new(ledger: Arc<QuotaLedger>) -> Self {
        Self { ledger }
    }

    pub async fn handle(&self, cmd: ExportContractCommand) -> Gated<ExportContractResult> {
        match self.ledger.consume(ActionId::ExportPdf).await {
            ConsumeOutcome::Consumed { cost, remaining } => {
                let file_name = cmd.data.export_file_name();
                tracing::info!(file_name = %file_name, cost, remaining, "Export approved");
                Gated::Completed(ExportContractResult {
                    file_name,
                    price_in_words: cmd.data.price_in_words(),
                    cost,
                    remaining,
                })
            }
            ConsumeOutcome::UpgradeRequired(pending) => Gated::UpgradeRequired(pending),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryKeyValueStore;
    use crate::application::handlers::contract::test_support::{contract, ledger};

    #[tokio::test]
    async fn free_plan_exports_once() {
        let store = InMemoryKeyValueStore::new();
        let ledger = ledger(&store).await;
        let handler = ExportContractHandler::new(ledger.clone());

        let mut data = contract("Maria da Silva");
        data.price_cents = 250_000;
        let first = handler.handle(ExportContractCommand { data }).await;
        assert_eq!(
            first,
            Gated::Completed(ExportContractResult {
                file_name: "Maria_da_Silva_contrato.pdf".to_string(),
                price_in_words: "dois mil quinhentos reais".to_string(),
                cost: 10,
                remaining: 0,
            })
        );

        let second = handler
            .handle(ExportContractCommand {
                data: contract("Maria da Silva"),
            })
            .await;
        assert_eq!(second.pending().unwrap().action, ActionId::ExportPdf);
        assert_eq!(ledger.snapshot().await.remaining, 0);
    }
}
