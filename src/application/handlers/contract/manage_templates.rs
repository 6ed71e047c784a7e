//! Template management - ungated commands and queries over custom templates.

use std::sync::Arc;

use crate::domain::contract::{builtin_templates, ContractData, ContractTemplate, TemplateLibrary};
use crate::domain::foundation::{DomainError, TemplateId};
use crate::ports::{KeyValueStore, PersistedSlot};

use super::templates_slot;

/// Every template available to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateListing {
    pub builtin: Vec<ContractTemplate>,
    /// Newest first.
    pub custom: Vec<ContractTemplate>,
}

/// Query handler listing templates.
pub struct ListTemplatesHandler {
    templates: PersistedSlot<TemplateLibrary>,
}

impl ListTemplatesHandler {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            templates: templates_slot(store),
        }
    }

    pub async fn handle(&self) -> TemplateListing {
        let library = self.templates.load().await.unwrap_or_default();
        TemplateListing {
            builtin: builtin_templates().to_vec(),
            custom: library.templates().to_vec(),
        }
    }
}

/// Command to save the record's clauses as a template.
#[derive(Debug, Clone)]
pub struct CreateTemplateCommand {
    pub data: ContractData,
    pub name: String,
    pub description: Option<String>,
}

/// Handler for creating custom templates.
pub struct CreateTemplateHandler {
    templates: PersistedSlot<TemplateLibrary>,
}

impl CreateTemplateHandler {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            templates: templates_slot(store),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateTemplateCommand,
    ) -> Result<ContractTemplate, DomainError> {
        let template =
            ContractTemplate::from_contract(&cmd.data, &cmd.name, cmd.description.as_deref())?;

        let mut library = self.templates.load().await.unwrap_or_default();
        library.add(template.clone());
        self.templates.save(&library).await;

        tracing::debug!(template_id = %template.id, name = %template.name, "Created template");
        Ok(template)
    }
}

/// Command to delete a custom template.
#[derive(Debug, Clone)]
pub struct DeleteTemplateCommand {
    pub template_id: TemplateId,
}

/// Handler for deleting custom templates.
pub struct DeleteTemplateHandler {
    templates: PersistedSlot<TemplateLibrary>,
}

impl DeleteTemplateHandler {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            templates: templates_slot(store),
        }
    }

    /// Returns true if the template existed. Built-ins cannot be deleted.
    pub async fn handle(&self, cmd: DeleteTemplateCommand) -> bool {
        if !cmd.template_id.is_custom() {
            return false;
        }

        let mut library = self.templates.load().await.unwrap_or_default();
        if !library.delete(&cmd.template_id) {
            return false;
        }
        self.templates.save(&library).await;
        true
    }
}
