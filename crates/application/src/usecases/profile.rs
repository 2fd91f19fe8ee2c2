//! Self-service profile updates.

use std::sync::Arc;

use async_trait::async_trait;
use domain::account::Account;
use domain::slug::slugify;
use domain::validate::{self, Violations};

use crate::dto::ProfileUpdate;
use crate::error::{Result, WorkflowError};
use crate::ports::inbound::UpdateProfile;
use crate::ports::outbound::AccountStore;
use crate::usecases::{fold_unique, taken_message};

/// Checks name/slug uniqueness against every other account.
pub(crate) async fn check_name_unique(
    store: &dyn AccountStore,
    violations: &mut Violations,
    account: &Account,
) -> Result<()> {
    if account.name.is_empty() || violations.contains_field("name") {
        return Ok(());
    }

    match store.find_by_name(&account.name).await? {
        Some(other) if other.id != account.id => {
            violations.push("name", taken_message("name"));
        },
        _ => {
            if let Some(other) = store.find_by_slug(&account.slug).await? {
                if other.id != account.id {
                    violations.push("slug", taken_message("slug"));
                }
            }
        },
    }

    Ok(())
}

/// Profile workflow service.
pub struct ProfileUseCase {
    store: Arc<dyn AccountStore>,
}

impl ProfileUseCase {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UpdateProfile for ProfileUseCase {
    async fn update_profile(
        &self,
        account: &Account,
        update: ProfileUpdate,
    ) -> Result<Account> {
        let mut account = account.clone();

        if let Some(name) = update.name {
            account.name = name.trim().to_string();
            account.slug = slugify(&account.name);
        }
        if let Some(gender) = update.gender {
            account.gender = Some(gender);
        }

        let mut violations = Violations::new();
        validate::name(&mut violations, &account.name);
        check_name_unique(self.store.as_ref(), &mut violations, &account)
            .await?;

        if !violations.is_empty() {
            return Err(WorkflowError::ProfileNotUpdated(violations));
        }

        self.store
            .save(&account)
            .await
            .map_err(|e| fold_unique(e, WorkflowError::ProfileNotUpdated))?;

        Ok(account)
    }
}
