//! Autologin ("remember me") port.

use async_trait::async_trait;
use chrono::TimeDelta;
use domain::account::{Account, AccountId};

use crate::dto::ResolvedSession;
use crate::error::Result;

/// Inbound port for the long-lived autologin token pair and the
/// per-request current-account resolution.
#[async_trait]
pub trait Autologin: Send + Sync {
    /// Issues the autologin token pair, valid for `ttl`.
    async fn remember_me(
        &self,
        account: &Account,
        ttl: TimeDelta,
    ) -> Result<Account>;

    /// Clears the autologin token pair.
    async fn forget_me(&self, account: &Account) -> Result<Account>;

    /// Resolves an autologin cookie value to its account, only while
    /// the token is unexpired. Expired tokens are left in place;
    /// cleanup is the caller's lazy concern.
    async fn resolve_from_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>>;

    /// The per-request session-loading step: the session id wins, the
    /// autologin cookie is the fallback and asks for promotion.
    async fn load_current_account(
        &self,
        session_account_id: Option<AccountId>,
        cookie_token: Option<&str>,
    ) -> Result<Option<ResolvedSession>>;
}
