//! Email change port.

use async_trait::async_trait;
use domain::account::Account;

use crate::error::Result;

/// Inbound port for the two-phase email change workflow.
#[async_trait]
pub trait EmailChange: Send + Sync {
    /// Stages `new_email` with a fresh activation token and notifies
    /// the candidate address.
    async fn request_email_change(
        &self,
        account: &Account,
        new_email: &str,
    ) -> Result<Account>;

    /// Commits a staged email change; does not require a session.
    async fn activate_email_change(&self, token: &str) -> Result<Account>;
}
