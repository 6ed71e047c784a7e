//! ApplyTemplateHandler - Command handler for applying a template to a record.
//!
//! Custom templates (`custom-` ids) are looked up in the user's library,
//! everything else among the built-ins.

use std::sync::Arc;

use crate::application::handlers::Gated;
use crate::application::QuotaLedger;
use crate::domain::contract::{builtin_template, ContractData, ContractTemplate, TemplateLibrary};
use crate::domain::foundation::{DomainError, ErrorCode, TemplateId};
use crate::domain::quota::{ActionId, ConsumeOutcome};
use crate::ports::{KeyValueStore, PersistedSlot};

use super::templates_slot;

/// Command to apply a template to `data`.
#[derive(Debug, Clone)]
pub struct ApplyTemplateCommand {
    pub template_id: TemplateId,
    pub data: ContractData,
}

/// The record with the template applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyTemplateResult {
    pub template: ContractTemplate,
    pub data: ContractData,
}

/// Handler for applying templates.
pub struct ApplyTemplateHandler {
    ledger: Arc<QuotaLedger>,
    templates: PersistedSlot<TemplateLibrary>,
}

impl ApplyTemplateHandler {
    pub fn new(ledger: Arc<QuotaLedger>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            ledger,
            templates: templates_slot(store),
        }
    }

    /// Unknown templates fail before anything is debited.
    pub async fn handle(
        &self,
        cmd: ApplyTemplateCommand,
    ) -> Result<Gated<ApplyTemplateResult>, DomainError> {
        let template = self.find(&cmd.template_id).await.ok_or_else(|| {
            DomainError::new(ErrorCode::TemplateNotFound, "Template not found")
                .with_detail("template_id", cmd.template_id.to_string())
        })?;

        if let ConsumeOutcome::UpgradeRequired(pending) =
            self.ledger.consume(ActionId::ApplyTemplate).await
        {
            return Ok(Gated::UpgradeRequired(pending));
        }

        let mut data = cmd.data;
        template.apply_to(&mut data);

        tracing::debug!(template_id = %template.id, "Applied template");
        Ok(Gated::Completed(ApplyTemplateResult { template, data }))
    }

    async fn find(&self, id: &TemplateId) -> Option<ContractTemplate> {
        if id.is_custom() {
            let library = self.templates.load().await.unwrap_or_default();
            library.find(id).cloned()
        } else {
            builtin_template(id).cloned()
        }
    }
}
