//! Password reset and change workflows.

use std::sync::Arc;

use async_trait::async_trait;
use domain::account::Account;
use domain::validate::{self, PasswordContext, Violations};

use crate::config::Settings;
use crate::dto::PasswordChange;
use crate::error::{Result, WorkflowError};
use crate::ports::inbound::PasswordManagement;
use crate::ports::outbound::{
    AccountStore, CryptoError, Notifier, PasswordDigest, SecureRandom,
};
use crate::usecases::auth::check_credentials;
use crate::usecases::normalize_email;

/// Replaces an account's secret with the digest of `plaintext`.
///
/// Owns salt provisioning: a salt is generated here exactly once, for
/// accounts that never had one, and reused forever after.
pub fn set_password(
    account: &mut Account,
    plaintext: &str,
    digest: &dyn PasswordDigest,
    random: &dyn SecureRandom,
    salt_length: usize,
) -> std::result::Result<(), CryptoError> {
    if account.salt.is_empty() {
        account.salt = random.random_string(salt_length);
    }
    account.hashed_secret = digest.digest(plaintext, &account.salt)?;
    Ok(())
}

/// Password workflow service.
pub struct PasswordUseCase {
    store: Arc<dyn AccountStore>,
    digest: Arc<dyn PasswordDigest>,
    random: Arc<dyn SecureRandom>,
    notifier: Arc<dyn Notifier>,
    settings: Arc<Settings>,
}

impl PasswordUseCase {
    pub fn new(
        store: Arc<dyn AccountStore>,
        digest: Arc<dyn PasswordDigest>,
        random: Arc<dyn SecureRandom>,
        notifier: Arc<dyn Notifier>,
        settings: Arc<Settings>,
    ) -> Self {
        Self {
            store,
            digest,
            random,
            notifier,
            settings,
        }
    }
}

#[async_trait]
impl PasswordManagement for PasswordUseCase {
    async fn forgot_password(&self, email: &str) -> Result<()> {
        // Anonymous flow: an unknown address is a plain not-found, not
        // the authentication workflow's wrong-email refusal.
        let Some(mut account) =
            self.store.find_by_email(&normalize_email(email)).await?
        else {
            return Err(WorkflowError::NotFound);
        };

        let password = self
            .random
            .random_string(self.settings.generated_password_length);
        set_password(
            &mut account,
            &password,
            self.digest.as_ref(),
            self.random.as_ref(),
            self.settings.salt_length,
        )?;

        self.store.save(&account).await?;

        tracing::info!(account_id = %account.id, "password reset");

        if let Err(err) = self
            .notifier
            .send_forgot_password(&account.email, &password)
            .await
        {
            tracing::warn!(account_id = %account.id, error = %err, "forgot-password notification not dispatched");
        }

        Ok(())
    }

    async fn change_password(
        &self,
        account: &Account,
        change: PasswordChange,
    ) -> Result<Account> {
        // Re-authenticate with the old password first; any refusal
        // (notably a wrong old password) propagates unchanged.
        let mut account = check_credentials(
            self.store.as_ref(),
            self.digest.as_ref(),
            &account.email,
            &change.old_password,
        )
        .await?;

        let mut violations = Violations::new();
        validate::password(
            &mut violations,
            PasswordContext::Required,
            &change.password,
            Some(&change.password_confirmation),
        );
        if !violations.is_empty() {
            return Err(WorkflowError::PasswordNotChanged(violations));
        }

        set_password(
            &mut account,
            &change.password,
            self.digest.as_ref(),
            self.random.as_ref(),
            self.settings.salt_length,
        )?;

        self.store.save(&account).await?;

        tracing::info!(account_id = %account.id, "password changed");

        if let Err(err) = self
            .notifier
            .send_password_changed(&account.email, &change.password)
            .await
        {
            tracing::warn!(account_id = %account.id, error = %err, "password-changed notification not dispatched");
        }

        Ok(account)
    }
}
