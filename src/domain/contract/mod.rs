//! Contract workspace domain module.
//!
//! - `record` - ContractData edited by the form
//! - `history` - Saved snapshots, newest first
//! - `template` - Reusable clause sets
//! - `builtin` - Templates shipped with the tool
//! - `amount_in_words` - Price spelled out for the contract body

mod amount_in_words;
mod builtin;
mod history;
mod record;
mod template;

pub use amount_in_words::amount_in_words;
pub use builtin::{builtin_template, builtin_templates};
pub use history::{ContractHistory, SavedContract};
pub use record::{ClientInfo, ContractData};
pub use template::{ContractTemplate, TemplateLibrary};
