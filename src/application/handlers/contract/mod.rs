//! Contract workspace handlers.
//!
//! ## Gated commands (debit the ledger first)
//! - Saving a contract to history (`save-contract`)
//! - Loading a contract from history (`load-contract`)
//! - Applying a template (`apply-template`)
//! - Exporting a document (`export-pdf`)
//!
//! ## Ungated commands and queries
//! - Listing, deleting and clearing history
//! - Listing, creating and deleting custom templates

mod apply_template;
mod export_contract;
mod load_contract;
mod manage_history;
mod manage_templates;
mod save_contract;

pub use apply_template::{ApplyTemplateCommand, ApplyTemplateHandler, ApplyTemplateResult};
pub use export_contract::{ExportContractCommand, ExportContractHandler, ExportContractResult};
pub use load_contract::{LoadContractCommand, LoadContractHandler};
pub use manage_history::{
    ClearHistoryHandler, DeleteContractCommand, DeleteContractHandler, ListContractsHandler,
};
pub use manage_templates::{
    CreateTemplateCommand, CreateTemplateHandler, DeleteTemplateCommand, DeleteTemplateHandler,
    ListTemplatesHandler, TemplateListing,
};
pub use save_contract::{SaveContractCommand, SaveContractHandler};

use std::sync::Arc;

use crate::domain::contract::{ContractHistory, TemplateLibrary};
use crate::ports::{KeyValueStore, PersistedSlot};

/// Storage key of the saved-contract history.
pub const HISTORY_KEY: &str = "contract-history:v1";

/// Storage key of the user-defined templates.
pub const TEMPLATES_KEY: &str = "custom-templates:v1";

pub(crate) fn history_slot(store: Arc<dyn KeyValueStore>) -> PersistedSlot<ContractHistory> {
    PersistedSlot::new(store, HISTORY_KEY)
}

pub(crate) fn templates_slot(store: Arc<dyn KeyValueStore>) -> PersistedSlot<TemplateLibrary> {
    PersistedSlot::new(store, TEMPLATES_KEY)
}
