//! Password reset/change port.

use async_trait::async_trait;
use domain::account::Account;

use crate::dto::PasswordChange;
use crate::error::Result;

/// Inbound port for the password workflows.
#[async_trait]
pub trait PasswordManagement: Send + Sync {
    /// Replaces the password of the account behind `email` with a fresh
    /// random one and dispatches it. Anonymous flow: the account may be
    /// inactive, and an unknown email is a plain not-found.
    async fn forgot_password(&self, email: &str) -> Result<()>;

    /// Self-service change, gated on re-authentication with the old
    /// password.
    async fn change_password(
        &self,
        account: &Account,
        change: PasswordChange,
    ) -> Result<Account>;
}
