//! Autologin token management and session loading.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::TimeDelta;
use domain::account::{Account, AccountId};

use crate::dto::ResolvedSession;
use crate::error::{Result, WorkflowError};
use crate::ports::inbound::Autologin;
use crate::ports::outbound::{AccountStore, Clock, TokenDigest};

/// Autologin workflow service.
pub struct AutologinUseCase {
    store: Arc<dyn AccountStore>,
    tokens: Arc<dyn TokenDigest>,
    clock: Arc<dyn Clock>,
}

impl AutologinUseCase {
    pub fn new(
        store: Arc<dyn AccountStore>,
        tokens: Arc<dyn TokenDigest>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            tokens,
            clock,
        }
    }
}

#[async_trait]
impl Autologin for AutologinUseCase {
    async fn remember_me(
        &self,
        account: &Account,
        ttl: TimeDelta,
    ) -> Result<Account> {
        let mut account = account.clone();
        let expires_at = self.clock.now() + ttl;

        account.autologin_token = Some(self.tokens.digest(&format!(
            "{}{}{}",
            account.salt,
            account.email,
            expires_at.to_rfc3339()
        )));
        account.autologin_expires_at = Some(expires_at);

        self.store.raw_update(&account).await?;
        Ok(account)
    }

    async fn forget_me(&self, account: &Account) -> Result<Account> {
        let mut account = account.clone();
        account.autologin_token = None;
        account.autologin_expires_at = None;

        self.store.raw_update(&account).await?;
        Ok(account)
    }

    async fn resolve_from_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>> {
        if token.is_empty() {
            return Ok(None);
        }

        let Some(account) =
            self.store.find_by_autologin_token(token).await?
        else {
            return Ok(None);
        };

        // An expired pair is merely ignored here; clearing it is the
        // caller's lazy cleanup, not this component's job.
        if account.autologin_valid_at(self.clock.now()) {
            Ok(Some(account))
        } else {
            Ok(None)
        }
    }

    async fn load_current_account(
        &self,
        session_account_id: Option<AccountId>,
        cookie_token: Option<&str>,
    ) -> Result<Option<ResolvedSession>> {
        if let Some(id) = session_account_id {
            let account = self
                .store
                .find_by_id(id)
                .await?
                .ok_or(WorkflowError::NotFound)?;
            return Ok(Some(ResolvedSession {
                account,
                promote_to_session: false,
            }));
        }

        if let Some(token) = cookie_token {
            if let Some(account) = self.resolve_from_token(token).await? {
                return Ok(Some(ResolvedSession {
                    account,
                    promote_to_session: true,
                }));
            }
        }

        Ok(None)
    }
}
