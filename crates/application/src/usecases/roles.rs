//! Role predicates and assignment.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use domain::account::Account;
use domain::role::RoleSlug;

use crate::config::Settings;
use crate::error::{Result, WorkflowError};
use crate::ports::inbound::Authorization;
use crate::ports::outbound::AccountStore;

/// Authorization service over the configured role set.
pub struct RolesUseCase {
    store: Arc<dyn AccountStore>,
    settings: Arc<Settings>,
}

impl RolesUseCase {
    pub fn new(store: Arc<dyn AccountStore>, settings: Arc<Settings>) -> Self {
        Self { store, settings }
    }
}

#[async_trait]
impl Authorization for RolesUseCase {
    fn has_role(&self, current: Option<&Account>, slug: &RoleSlug) -> bool {
        current.is_some_and(|account| account.has_role(slug))
    }

    fn require_role<'a>(
        &self,
        current: Option<&'a Account>,
        slug: &RoleSlug,
    ) -> Result<&'a Account> {
        match current {
            Some(account) if account.has_role(slug) => Ok(account),
            _ => Err(WorkflowError::MissingRole { role: slug.clone() }),
        }
    }

    async fn replace_roles(
        &self,
        account: &Account,
        selections: &BTreeSet<RoleSlug>,
    ) -> Result<Account> {
        let mut account = account.clone();

        // Replace, not merge; selections outside the configured set are
        // skipped silently.
        account.roles = selections
            .iter()
            .filter(|slug| self.settings.role(slug).is_some())
            .cloned()
            .collect();

        self.store.raw_update(&account).await?;

        tracing::info!(
            account_id = %account.id,
            roles = %account.roles.iter().map(RoleSlug::as_str).collect::<Vec<_>>().join(","),
            "roles replaced"
        );

        Ok(account)
    }
}
