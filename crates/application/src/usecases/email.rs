//! Two-phase email change workflow.

use std::sync::Arc;

use async_trait::async_trait;
use domain::account::Account;
use domain::validate::{self, Violations};

use crate::error::{Result, WorkflowError};
use crate::ports::inbound::EmailChange;
use crate::ports::outbound::{AccountStore, Clock, Notifier, TokenDigest};
use crate::usecases::{fold_unique, normalize_email, taken_message};

/// Email change workflow service.
pub struct EmailChangeUseCase {
    store: Arc<dyn AccountStore>,
    tokens: Arc<dyn TokenDigest>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl EmailChangeUseCase {
    pub fn new(
        store: Arc<dyn AccountStore>,
        tokens: Arc<dyn TokenDigest>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            tokens,
            notifier,
            clock,
        }
    }
}

#[async_trait]
impl EmailChange for EmailChangeUseCase {
    async fn request_email_change(
        &self,
        account: &Account,
        new_email: &str,
    ) -> Result<Account> {
        let new_email = normalize_email(new_email);
        if new_email.is_empty() {
            return Err(WorkflowError::InvalidArgument(
                "new email address is required",
            ));
        }

        let mut violations = Violations::new();
        validate::pending_email(&mut violations, &new_email);

        // A collision with a current address would only surface at
        // commit time otherwise, long after the requester is gone.
        if !violations.contains_field("pending_email")
            && self.store.find_by_email(&new_email).await?.is_some()
        {
            violations.push("pending_email", taken_message("pending_email"));
        }

        if !violations.is_empty() {
            return Err(WorkflowError::EmailNotChanged(violations));
        }

        let mut account = account.clone();
        let token = self.tokens.digest(&format!(
            "{}{}{}",
            account.salt,
            new_email,
            self.clock.now().timestamp()
        ));
        account.pending_email = Some(new_email.clone());
        account.pending_email_token = Some(token.clone());

        self.store
            .save(&account)
            .await
            .map_err(|e| fold_unique(e, WorkflowError::EmailNotChanged))?;

        tracing::info!(account_id = %account.id, "email change requested");

        if let Err(err) = self
            .notifier
            .send_email_change_activation(&new_email, &token)
            .await
        {
            tracing::warn!(account_id = %account.id, error = %err, "email-change notification not dispatched");
        }

        Ok(account)
    }

    async fn activate_email_change(&self, token: &str) -> Result<Account> {
        let token = token.trim();
        if token.is_empty() {
            return Err(WorkflowError::InvalidArgument(
                "activation code is required",
            ));
        }

        let Some(mut account) =
            self.store.find_by_pending_email_token(token).await?
        else {
            return Err(WorkflowError::NotFound);
        };

        let Some(pending) = account.pending_email.take() else {
            return Err(WorkflowError::NotFound);
        };

        account.email = pending;
        account.pending_email = None;
        account.pending_email_token = None;

        self.store
            .save(&account)
            .await
            .map_err(|e| fold_unique(e, WorkflowError::EmailNotChanged))?;

        tracing::info!(account_id = %account.id, "email change committed");

        Ok(account)
    }
}
