//! Registration and activation workflow.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use domain::account::{Account, NewAccount};
use domain::slug::slugify;
use domain::validate::{self, Violations};

use crate::config::Settings;
use crate::dto::RegisterRequest;
use crate::error::{Result, WorkflowError};
use crate::ports::inbound::Registration;
use crate::ports::outbound::{
    AccountStore, Clock, Notifier, PasswordDigest, SecureRandom, TokenDigest,
};
use crate::usecases::{fold_unique, normalize_email, taken_message};

/// Registration and activation workflow service.
pub struct RegistrationUseCase {
    store: Arc<dyn AccountStore>,
    digest: Arc<dyn PasswordDigest>,
    tokens: Arc<dyn TokenDigest>,
    random: Arc<dyn SecureRandom>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    settings: Arc<Settings>,
}

impl RegistrationUseCase {
    pub fn new(
        store: Arc<dyn AccountStore>,
        digest: Arc<dyn PasswordDigest>,
        tokens: Arc<dyn TokenDigest>,
        random: Arc<dyn SecureRandom>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        settings: Arc<Settings>,
    ) -> Self {
        Self {
            store,
            digest,
            tokens,
            random,
            notifier,
            clock,
            settings,
        }
    }
}

#[async_trait]
impl Registration for RegistrationUseCase {
    async fn register(&self, request: RegisterRequest) -> Result<Account> {
        let email = normalize_email(&request.email);
        let name = request.name.unwrap_or_default().trim().to_string();
        let slug = slugify(&name);

        let mut violations = Violations::new();
        validate::email(&mut violations, &email);
        validate::name(&mut violations, &name);

        if self.settings.require_legal_acceptance
            && !request.accepted_legal_notice
        {
            violations
                .push("legal_notice", "the legal notice must be accepted");
        }

        if !violations.contains_field("email")
            && self.store.find_by_email(&email).await?.is_some()
        {
            violations.push("email", taken_message("email"));
        }
        if !name.is_empty() && !violations.contains_field("name") {
            if self.store.find_by_name(&name).await?.is_some() {
                violations.push("name", taken_message("name"));
            } else if self.store.find_by_slug(&slug).await?.is_some() {
                violations.push("slug", taken_message("slug"));
            }
        }

        if !violations.is_empty() {
            return Err(WorkflowError::NotRegistered(violations));
        }

        let now = self.clock.now();
        let salt = self.random.random_string(self.settings.salt_length);
        let password = self
            .random
            .random_string(self.settings.generated_password_length);
        let hashed_secret = self.digest.digest(&password, &salt)?;
        let activation_token = self
            .tokens
            .digest(&format!("{salt}{email}{}", now.timestamp()));

        let mut roles = BTreeSet::new();
        if self.settings.role(&self.settings.default_role).is_some() {
            roles.insert(self.settings.default_role.clone());
        }

        let account = self
            .store
            .insert(NewAccount {
                email,
                name,
                slug,
                gender: None,
                salt,
                hashed_secret,
                activation_token: activation_token.clone(),
                blocked: false,
                roles,
                created_at: now,
            })
            .await
            .map_err(|e| fold_unique(e, WorkflowError::NotRegistered))?;

        tracing::info!(account_id = %account.id, "account registered");

        if let Err(err) = self
            .notifier
            .send_welcome(&account.email, &password, &activation_token)
            .await
        {
            tracing::warn!(account_id = %account.id, error = %err, "welcome notification not dispatched");
        }

        Ok(account)
    }

    async fn resend_activation_code(&self, email: &str) -> Result<Account> {
        let account = self
            .store
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(WorkflowError::UnauthorizedWrongEmail)?;

        if account.activated {
            return Err(WorkflowError::AlreadyActivated);
        }

        // The existing code is re-sent, never regenerated: a previously
        // delivered copy must stay usable.
        let Some(token) = account.activation_token.as_deref() else {
            return Err(WorkflowError::BadActivationCode);
        };

        if let Err(err) = self
            .notifier
            .send_activation_code(&account.email, token)
            .await
        {
            tracing::warn!(account_id = %account.id, error = %err, "activation code not dispatched");
        }

        Ok(account)
    }

    async fn activate(&self, code: &str) -> Result<Account> {
        let code = code.trim();
        if code.is_empty() {
            return Err(WorkflowError::InvalidArgument(
                "activation code is required",
            ));
        }

        let mut account = self
            .store
            .find_by_activation_token(code)
            .await?
            .ok_or(WorkflowError::BadActivationCode)?;

        if account.activated {
            return Err(WorkflowError::AlreadyActivated);
        }
        if account.blocked {
            return Err(WorkflowError::UnauthorizedAccountBlocked);
        }

        account.activated = true;
        account.activated_at = Some(self.clock.now());
        // Activation logs the user in, so it counts as the first login.
        account.login_count += 1;

        self.store.raw_update(&account).await?;

        tracing::info!(account_id = %account.id, "account activated");

        Ok(account)
    }
}
