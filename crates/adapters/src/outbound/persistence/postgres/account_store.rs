//! PostgreSQL implementation of the account store.

use application::ports::outbound::{AccountStore, StoreError};
use async_trait::async_trait;
use domain::account::{Account, AccountId, NewAccount};
use sqlx::PgPool;
use sqlx::postgres::PgQueryResult;

use super::models::AccountRecord;

const SELECT_ACCOUNT: &str = "
    SELECT
        id, email, pending_email, pending_email_token, name, slug,
        gender, salt, hashed_secret, activation_token, activated,
        activated_at, blocked, autologin_token, autologin_expires_at,
        login_count, current_ip, last_ip, last_failed_ip,
        current_login_at, last_login_at, last_failed_login_at, roles,
        created_at, updated_at
    FROM accounts
";

/// PostgreSQL account store.
///
/// Uniqueness of `email`, `name` and `slug` is enforced by partial
/// unique indexes (blank names and slugs are excluded) and mapped back
/// to [`StoreError::UniqueViolation`] by constraint name.
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    /// Create a new [`PgAccountStore`].
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_where(
        &self,
        clause: &str,
        value: &str,
    ) -> Result<Option<Account>, StoreError> {
        let record = sqlx::query_as::<_, AccountRecord>(&format!(
            "{SELECT_ACCOUNT} WHERE {clause} = $1"
        ))
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_error)?;

        Ok(record.map(AccountRecord::into_account))
    }
}

fn map_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            let field = match db.constraint() {
                Some("accounts_name_key") => "name",
                Some("accounts_slug_key") => "slug",
                _ => "email",
            };
            return StoreError::UniqueViolation { field };
        }
    }

    StoreError::backend(err)
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_id(
        &self,
        id: AccountId,
    ) -> Result<Option<Account>, StoreError> {
        let record = sqlx::query_as::<_, AccountRecord>(&format!(
            "{SELECT_ACCOUNT} WHERE id = $1"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_error)?;

        Ok(record.map(AccountRecord::into_account))
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Account>, StoreError> {
        self.find_where("email", email).await
    }

    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Account>, StoreError> {
        if name.is_empty() {
            return Ok(None);
        }
        self.find_where("name", name).await
    }

    async fn find_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Account>, StoreError> {
        if slug.is_empty() {
            return Ok(None);
        }
        self.find_where("slug", slug).await
    }

    async fn find_by_activation_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, StoreError> {
        self.find_where("activation_token", token).await
    }

    async fn find_by_pending_email_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, StoreError> {
        self.find_where("pending_email_token", token).await
    }

    async fn find_by_autologin_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, StoreError> {
        self.find_where("autologin_token", token).await
    }

    async fn insert(
        &self,
        account: NewAccount,
    ) -> Result<Account, StoreError> {
        let roles: Vec<String> = account
            .roles
            .iter()
            .map(|slug| slug.as_str().to_string())
            .collect();

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO accounts (
                email, name, slug, gender, salt, hashed_secret,
                activation_token, activated, blocked, login_count,
                roles, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, $8, 0, $9, $10, $10)
            RETURNING id
            "#,
        )
        .bind(&account.email)
        .bind(&account.name)
        .bind(&account.slug)
        .bind(account.gender.map(|g| g.as_str()))
        .bind(&account.salt)
        .bind(&account.hashed_secret)
        .bind(&account.activation_token)
        .bind(account.blocked)
        .bind(&roles)
        .bind(account.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_error)?;

        Ok(account.into_account(AccountId::new(id)))
    }

    async fn save(&self, account: &Account) -> Result<(), StoreError> {
        self.raw_update(account).await
    }

    async fn raw_update(&self, account: &Account) -> Result<(), StoreError> {
        let record = AccountRecord::from(account);

        let result: PgQueryResult = sqlx::query(
            r#"
            UPDATE accounts
            SET
                email = $2,
                pending_email = $3,
                pending_email_token = $4,
                name = $5,
                slug = $6,
                gender = $7,
                salt = $8,
                hashed_secret = $9,
                activation_token = $10,
                activated = $11,
                activated_at = $12,
                blocked = $13,
                autologin_token = $14,
                autologin_expires_at = $15,
                login_count = $16,
                current_ip = $17,
                last_ip = $18,
                last_failed_ip = $19,
                current_login_at = $20,
                last_login_at = $21,
                last_failed_login_at = $22,
                roles = $23,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(record.id)
        .bind(&record.email)
        .bind(&record.pending_email)
        .bind(&record.pending_email_token)
        .bind(&record.name)
        .bind(&record.slug)
        .bind(&record.gender)
        .bind(&record.salt)
        .bind(&record.hashed_secret)
        .bind(&record.activation_token)
        .bind(record.activated)
        .bind(record.activated_at)
        .bind(record.blocked)
        .bind(&record.autologin_token)
        .bind(record.autologin_expires_at)
        .bind(record.login_count)
        .bind(&record.current_ip)
        .bind(&record.last_ip)
        .bind(&record.last_failed_ip)
        .bind(record.current_login_at)
        .bind(record.last_login_at)
        .bind(record.last_failed_login_at)
        .bind(&record.roles)
        .execute(&self.pool)
        .await
        .map_err(map_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Missing);
        }

        Ok(())
    }
}
