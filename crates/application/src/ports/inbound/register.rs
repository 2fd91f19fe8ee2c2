//! Registration and activation port.

use async_trait::async_trait;
use domain::account::Account;

use crate::dto::RegisterRequest;
use crate::error::Result;

/// Inbound port for the registration and activation workflow.
#[async_trait]
pub trait Registration: Send + Sync {
    /// Creates an unactivated account with generated credentials and
    /// dispatches the welcome notification.
    async fn register(&self, request: RegisterRequest) -> Result<Account>;

    /// Re-dispatches the existing activation code of an unactivated
    /// account.
    async fn resend_activation_code(&self, email: &str) -> Result<Account>;

    /// Consumes an activation code, marking the account active and
    /// counting the implicit first login.
    async fn activate(&self, code: &str) -> Result<Account>;
}
