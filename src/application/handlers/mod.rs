//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod auth;
pub mod contract;
mod gated;
pub mod quota;

pub use gated::Gated;

pub use auth::{
    CurrentSessionHandler, RegisterCommand, RegisterHandler, ResetPasswordCommand,
    ResetPasswordHandler, SignInCommand, SignInHandler, SignOutHandler,
};
pub use contract::{
    ApplyTemplateCommand, ApplyTemplateHandler, ApplyTemplateResult, ClearHistoryHandler,
    CreateTemplateCommand, CreateTemplateHandler, DeleteContractCommand, DeleteContractHandler,
    DeleteTemplateCommand, DeleteTemplateHandler, ExportContractCommand, ExportContractHandler,
    ExportContractResult, ListContractsHandler, ListTemplatesHandler, LoadContractCommand,
    LoadContractHandler, SaveContractCommand, SaveContractHandler, TemplateListing,
};
pub use quota::{
    ConfirmPaymentCommand, ConfirmPaymentHandler, ConfirmPaymentResult, SelectPlanCommand,
    SelectPlanHandler, SelectPlanResult,
};
