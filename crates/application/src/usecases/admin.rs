//! Administrative account updates.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use domain::account::Account;
use domain::role::RoleSlug;
use domain::slug::slugify;
use domain::validate::{self, PasswordContext, Violations};

use crate::config::Settings;
use crate::dto::AdminAccountUpdate;
use crate::error::{Result, WorkflowError};
use crate::ports::inbound::{AdministerAccounts, Authorization};
use crate::ports::outbound::{
    AccountStore, Clock, PasswordDigest, SecureRandom,
};
use crate::usecases::fold_unique;
use crate::usecases::password::set_password;
use crate::usecases::profile::check_name_unique;
use crate::usecases::roles::RolesUseCase;

/// Administrative workflow service.
pub struct AdminUseCase {
    store: Arc<dyn AccountStore>,
    digest: Arc<dyn PasswordDigest>,
    random: Arc<dyn SecureRandom>,
    clock: Arc<dyn Clock>,
    settings: Arc<Settings>,
    roles: RolesUseCase,
}

impl AdminUseCase {
    pub fn new(
        store: Arc<dyn AccountStore>,
        digest: Arc<dyn PasswordDigest>,
        random: Arc<dyn SecureRandom>,
        clock: Arc<dyn Clock>,
        settings: Arc<Settings>,
    ) -> Self {
        let roles = RolesUseCase::new(Arc::clone(&store), Arc::clone(&settings));
        Self {
            store,
            digest,
            random,
            clock,
            settings,
            roles,
        }
    }
}

#[async_trait]
impl AdministerAccounts for AdminUseCase {
    async fn update_account(
        &self,
        account: &Account,
        update: AdminAccountUpdate,
    ) -> Result<Account> {
        let mut account = account.clone();

        // Privileged flags first, through the raw path: the account may
        // legitimately fail field validation (blank name) and must
        // still be activatable or blockable.
        let mut privileged = false;
        if let Some(activated) = update.activated {
            if activated && !account.activated {
                account.activated_at = Some(self.clock.now());
            }
            account.activated = activated;
            privileged = true;
        }
        if let Some(blocked) = update.blocked {
            account.blocked = blocked;
            privileged = true;
        }
        if privileged {
            self.store.raw_update(&account).await?;
            tracing::info!(
                account_id = %account.id,
                activated = account.activated,
                blocked = account.blocked,
                "lifecycle flags updated"
            );
        }

        // Everything else goes through the validated path.
        let mut violations = Violations::new();

        if let Some(name) = update.name {
            account.name = name.trim().to_string();
            account.slug = slugify(&account.name);
        }
        if let Some(gender) = update.gender {
            account.gender = Some(gender);
        }
        validate::name(&mut violations, &account.name);
        check_name_unique(self.store.as_ref(), &mut violations, &account)
            .await?;

        // A blank password means "no change" and is dropped from the
        // update set entirely.
        let password = update
            .password
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty());
        if let Some(password) = password {
            validate::password(
                &mut violations,
                PasswordContext::Optional,
                password,
                update.password_confirmation.as_deref(),
            );
        }

        if !violations.is_empty() {
            return Err(WorkflowError::UserNotUpdated(violations));
        }

        if let Some(password) = password {
            set_password(
                &mut account,
                password,
                self.digest.as_ref(),
                self.random.as_ref(),
                self.settings.salt_length,
            )?;
        }

        self.store
            .save(&account)
            .await
            .map_err(|e| fold_unique(e, WorkflowError::UserNotUpdated))?;

        Ok(account)
    }

    async fn update_roles(
        &self,
        account: &Account,
        selections: &BTreeSet<RoleSlug>,
    ) -> Result<Account> {
        self.roles.replace_roles(account, selections).await
    }
}
