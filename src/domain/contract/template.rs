//! Contract templates: a service description plus a clause set.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{TemplateId, ValidationError};

use super::ContractData;

/// A reusable set of clauses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractTemplate {
    pub id: TemplateId,
    pub name: String,
    pub description: String,
    pub default_service_description: String,
    pub clauses: Vec<String>,
}

impl ContractTemplate {
    pub const DEFAULT_DESCRIPTION: &'static str = "Modelo personalizado";

    /// Builds a user-defined template from the current record.
    pub fn from_contract(
        data: &ContractData,
        name: &str,
        description: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        Ok(Self {
            id: TemplateId::new_custom(),
            name: name.to_string(),
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .unwrap_or(Self::DEFAULT_DESCRIPTION)
                .to_string(),
            default_service_description: data.service_description.clone(),
            clauses: data.additional_clauses.clone(),
        })
    }

    /// Replaces the record's service description and clauses with this template's.
    pub fn apply_to(&self, data: &mut ContractData) {
        data.service_description = self.default_service_description.clone();
        data.additional_clauses = self.clauses.clone();
    }
}

/// User-defined templates, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateLibrary {
    templates: Vec<ContractTemplate>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn templates(&self) -> &[ContractTemplate] {
        &self.templates
    }

    pub fn find(&self, id: &TemplateId) -> Option<&ContractTemplate> {
        self.templates.iter().find(|t| &t.id == id)
    }

    pub fn add(&mut self, template: ContractTemplate) {
        self.templates.insert(0, template);
    }

    /// Removes a template. Returns true if it existed.
    pub fn delete(&mut self, id: &TemplateId) -> bool {
        let before = self.templates.len();
        self.templates.retain(|t| &t.id != id);
        self.templates.len() != before
    }
}
