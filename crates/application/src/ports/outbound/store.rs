//! Account store port.

use async_trait::async_trait;
use domain::account::{Account, AccountId, NewAccount};

/// Failures of the storage adapter.
///
/// Uniqueness lives here on purpose: "check then write" is a race
/// under concurrent registration, so the store is the authority and
/// workflows fold [`StoreError::UniqueViolation`] back into the same
/// field-scoped validation failure a precheck would have produced.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violated on `{field}`")]
    UniqueViolation { field: &'static str },

    #[error("account no longer exists")]
    Missing,

    #[error("storage backend failure")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}

/// Port for account persistence.
///
/// Every `find_*` returns `Ok(None)` for "not found"; `Err` always
/// means the storage layer itself failed. Each write is one logical
/// transaction: it either applies fully or not at all.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_id(
        &self,
        id: AccountId,
    ) -> Result<Option<Account>, StoreError>;

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Account>, StoreError>;

    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Account>, StoreError>;

    async fn find_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Account>, StoreError>;

    async fn find_by_activation_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, StoreError>;

    async fn find_by_pending_email_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, StoreError>;

    async fn find_by_autologin_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, StoreError>;

    /// Creates the account and assigns its identifier.
    async fn insert(
        &self,
        account: NewAccount,
    ) -> Result<Account, StoreError>;

    /// Full write of an account the workflow has validated.
    async fn save(&self, account: &Account) -> Result<(), StoreError>;

    /// Full write that deliberately bypasses field validation, for
    /// privileged flags, token pairs and telemetry bookkeeping.
    /// Storage constraints (uniqueness) still apply.
    async fn raw_update(&self, account: &Account) -> Result<(), StoreError>;
}
