//! ResetPasswordHandler - Command handler for setting a new password.

use std::sync::Arc;

use secrecy::SecretString;

use crate::domain::foundation::DomainError;
use crate::ports::{AuthGateway, PasswordReset};

use super::sign_in::required;

/// Command to reset the password for an email.
#[derive(Debug, Clone)]
pub struct ResetPasswordCommand {
    pub email: String,
    pub new_password: SecretString,
}

/// Handler for password resets.
pub struct ResetPasswordHandler {
    gateway: Arc<dyn AuthGateway>,
}

impl ResetPasswordHandler {
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, cmd: ResetPasswordCommand) -> Result<(), DomainError> {
        let email = required("email", &cmd.email)?;

        self.gateway
            .reset_password(&PasswordReset {
                email: email.to_string(),
                new_password: cmd.new_password,
            })
            .await?;

        tracing::info!(email = %email, "Password reset");
        Ok(())
    }
}
