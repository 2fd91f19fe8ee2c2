//! Authentication port.

use async_trait::async_trait;
use domain::account::Account;

use crate::error::Result;

/// Inbound port for credential verification.
#[async_trait]
pub trait Authenticate: Send + Sync {
    /// Verifies credentials with ordered failure checks: unknown email,
    /// wrong password, not activated, blocked.
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Account>;

    /// Bookkeeping after a successful login: bumps the counter and
    /// shifts the current/last IP and timestamp pairs.
    async fn record_login(
        &self,
        account: &Account,
        ip: Option<&str>,
    ) -> Result<Account>;

    /// Best-effort bookkeeping after a failed password check.
    async fn record_failed_login(
        &self,
        email: &str,
        ip: Option<&str>,
    ) -> Result<()>;
}
