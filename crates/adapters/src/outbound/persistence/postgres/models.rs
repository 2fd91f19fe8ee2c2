//! Database models for PostgreSQL.

use chrono::{DateTime, Utc};
use domain::account::{Account, AccountId, Gender};
use domain::role::RoleSlug;
use sqlx::FromRow;

/// Account row as stored in the database.
///
/// `roles` is denormalized into a text array of slugs; the role
/// definitions themselves live in configuration.
#[derive(Debug, Clone, FromRow)]
pub struct AccountRecord {
    pub id: i64,
    pub email: String,
    pub pending_email: Option<String>,
    pub pending_email_token: Option<String>,
    pub name: String,
    pub slug: String,
    pub gender: Option<String>,
    pub salt: String,
    pub hashed_secret: String,
    pub activation_token: Option<String>,
    pub activated: bool,
    pub activated_at: Option<DateTime<Utc>>,
    pub blocked: bool,
    pub autologin_token: Option<String>,
    pub autologin_expires_at: Option<DateTime<Utc>>,
    pub login_count: i32,
    pub current_ip: Option<String>,
    pub last_ip: Option<String>,
    pub last_failed_ip: Option<String>,
    pub current_login_at: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub last_failed_login_at: Option<DateTime<Utc>>,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AccountRecord {
    pub fn into_account(self) -> Account {
        Account {
            id: AccountId::new(self.id),
            email: self.email,
            pending_email: self.pending_email,
            pending_email_token: self.pending_email_token,
            name: self.name,
            slug: self.slug,
            gender: self.gender.as_deref().and_then(Gender::parse),
            salt: self.salt,
            hashed_secret: self.hashed_secret,
            activation_token: self.activation_token,
            activated: self.activated,
            activated_at: self.activated_at,
            blocked: self.blocked,
            autologin_token: self.autologin_token,
            autologin_expires_at: self.autologin_expires_at,
            login_count: self.login_count.max(0) as u32,
            current_ip: self.current_ip,
            last_ip: self.last_ip,
            last_failed_ip: self.last_failed_ip,
            current_login_at: self.current_login_at,
            last_login_at: self.last_login_at,
            last_failed_login_at: self.last_failed_login_at,
            roles: self
                .roles
                .into_iter()
                .map(RoleSlug::new)
                .collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<&Account> for AccountRecord {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.get(),
            email: account.email.clone(),
            pending_email: account.pending_email.clone(),
            pending_email_token: account.pending_email_token.clone(),
            name: account.name.clone(),
            slug: account.slug.clone(),
            gender: account.gender.map(|g| g.as_str().to_string()),
            salt: account.salt.clone(),
            hashed_secret: account.hashed_secret.clone(),
            activation_token: account.activation_token.clone(),
            activated: account.activated,
            activated_at: account.activated_at,
            blocked: account.blocked,
            autologin_token: account.autologin_token.clone(),
            autologin_expires_at: account.autologin_expires_at,
            login_count: account.login_count as i32,
            current_ip: account.current_ip.clone(),
            last_ip: account.last_ip.clone(),
            last_failed_ip: account.last_failed_ip.clone(),
            current_login_at: account.current_login_at,
            last_login_at: account.last_login_at,
            last_failed_login_at: account.last_failed_login_at,
            roles: account
                .roles
                .iter()
                .map(|slug| slug.as_str().to_string())
                .collect(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}
