//! Authorization port.

use std::collections::BTreeSet;

use async_trait::async_trait;
use domain::account::Account;
use domain::role::RoleSlug;

use crate::error::Result;

/// Inbound port for role predicates and administrative role
/// assignment.
#[async_trait]
pub trait Authorization: Send + Sync {
    /// Whether a session-resolved account carries the role.
    fn has_role(&self, current: Option<&Account>, slug: &RoleSlug) -> bool;

    /// Guard form of [`Authorization::has_role`]; generic over the
    /// configured role slugs, parameterized at call sites.
    fn require_role<'a>(
        &self,
        current: Option<&'a Account>,
        slug: &RoleSlug,
    ) -> Result<&'a Account>;

    /// Replaces the account's role set with exactly the given slugs;
    /// slugs absent from the configuration are skipped silently.
    async fn replace_roles(
        &self,
        account: &Account,
        selections: &BTreeSet<RoleSlug>,
    ) -> Result<Account>;
}
