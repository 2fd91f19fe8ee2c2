//! In-memory account store for tests and local development.

use std::collections::HashMap;
use std::sync::Mutex;

use application::ports::outbound::{AccountStore, StoreError};
use async_trait::async_trait;
use domain::account::{Account, AccountId, NewAccount};

/// Account store backed by a process-local map.
///
/// Uniqueness is enforced under the same lock as the write, giving the
/// atomic check-and-insert the real database provides with constraints.
#[derive(Default)]
pub struct InMemoryAccountStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    accounts: HashMap<i64, Account>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn find_one<F>(&self, matches: F) -> Result<Option<Account>, StoreError>
    where
        F: Fn(&Account) -> bool,
    {
        let inner = self.inner.lock().expect("store lock poisoned");
        Ok(inner.accounts.values().find(|a| matches(a)).cloned())
    }
}

fn check_unique(
    accounts: &HashMap<i64, Account>,
    exclude: Option<AccountId>,
    email: &str,
    name: &str,
    slug: &str,
) -> Result<(), StoreError> {
    for account in accounts.values() {
        if Some(account.id) == exclude {
            continue;
        }
        if account.email == email {
            return Err(StoreError::UniqueViolation { field: "email" });
        }
        if !name.is_empty() && account.name == name {
            return Err(StoreError::UniqueViolation { field: "name" });
        }
        if !slug.is_empty() && account.slug == slug {
            return Err(StoreError::UniqueViolation { field: "slug" });
        }
    }
    Ok(())
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_id(
        &self,
        id: AccountId,
    ) -> Result<Option<Account>, StoreError> {
        let inner = self.inner.lock().expect("store lock poisoned");
        Ok(inner.accounts.get(&id.get()).cloned())
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Account>, StoreError> {
        self.find_one(|a| a.email == email)
    }

    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Account>, StoreError> {
        if name.is_empty() {
            return Ok(None);
        }
        self.find_one(|a| a.name == name)
    }

    async fn find_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Account>, StoreError> {
        if slug.is_empty() {
            return Ok(None);
        }
        self.find_one(|a| a.slug == slug)
    }

    async fn find_by_activation_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, StoreError> {
        self.find_one(|a| a.activation_token.as_deref() == Some(token))
    }

    async fn find_by_pending_email_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, StoreError> {
        self.find_one(|a| a.pending_email_token.as_deref() == Some(token))
    }

    async fn find_by_autologin_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, StoreError> {
        self.find_one(|a| a.autologin_token.as_deref() == Some(token))
    }

    async fn insert(
        &self,
        account: NewAccount,
    ) -> Result<Account, StoreError> {
        let mut inner = self.inner.lock().expect("store lock poisoned");

        check_unique(
            &inner.accounts,
            None,
            &account.email,
            &account.name,
            &account.slug,
        )?;

        inner.next_id += 1;
        let account = account.into_account(AccountId::new(inner.next_id));
        inner.accounts.insert(account.id.get(), account.clone());

        Ok(account)
    }

    async fn save(&self, account: &Account) -> Result<(), StoreError> {
        self.raw_update(account).await
    }

    async fn raw_update(&self, account: &Account) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("store lock poisoned");

        if !inner.accounts.contains_key(&account.id.get()) {
            return Err(StoreError::Missing);
        }

        check_unique(
            &inner.accounts,
            Some(account.id),
            &account.email,
            &account.name,
            &account.slug,
        )?;

        inner.accounts.insert(account.id.get(), account.clone());
        Ok(())
    }
}
