//! Administrative account management port.

use std::collections::BTreeSet;

use async_trait::async_trait;
use domain::account::Account;
use domain::role::RoleSlug;

use crate::dto::AdminAccountUpdate;
use crate::error::Result;

/// Inbound port for privileged account administration.
#[async_trait]
pub trait AdministerAccounts: Send + Sync {
    /// Applies privileged lifecycle flags directly and the remaining
    /// fields through the validated path.
    async fn update_account(
        &self,
        account: &Account,
        update: AdminAccountUpdate,
    ) -> Result<Account>;

    /// Replace-not-merge role assignment.
    async fn update_roles(
        &self,
        account: &Account,
        selections: &BTreeSet<RoleSlug>,
    ) -> Result<Account>;
}
