//! The account aggregate.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::role::RoleSlug;

/// Opaque account identifier, assigned by the store and immutable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct AccountId(i64);

impl AccountId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Profile-completeness field, stored as a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "f")]
    Female,
    #[serde(rename = "m")]
    Male,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Female => "f",
            Self::Male => "m",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "f" => Some(Self::Female),
            "m" => Some(Self::Male),
            _ => None,
        }
    }
}

/// A user account with its credentials, lifecycle state and roles.
///
/// Invariants upheld by the workflows:
/// - `activation_token` is present until `activated` is set, and is
///   kept (but never consulted for activation again) afterwards.
/// - `pending_email` and `pending_email_token` are both set or both
///   absent, same for `autologin_token` / `autologin_expires_at`.
/// - `salt` is generated exactly once and never rotated.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub pending_email: Option<String>,
    pub pending_email_token: Option<String>,
    /// Display name; blank means "not filled in yet".
    pub name: String,
    /// URL-safe derivation of `name`; blank iff `name` is blank.
    pub slug: String,
    pub gender: Option<Gender>,
    pub salt: String,
    pub hashed_secret: String,
    pub activation_token: Option<String>,
    pub activated: bool,
    pub activated_at: Option<DateTime<Utc>>,
    pub blocked: bool,
    pub autologin_token: Option<String>,
    pub autologin_expires_at: Option<DateTime<Utc>>,
    pub login_count: u32,
    pub current_ip: Option<String>,
    pub last_ip: Option<String>,
    pub last_failed_ip: Option<String>,
    pub current_login_at: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub last_failed_login_at: Option<DateTime<Utc>>,
    pub roles: BTreeSet<RoleSlug>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Whether the account carries the given role.
    pub fn has_role(&self, slug: &RoleSlug) -> bool {
        self.roles.contains(slug)
    }

    /// Whether the autologin token pair is present and unexpired.
    pub fn autologin_valid_at(&self, now: DateTime<Utc>) -> bool {
        match (&self.autologin_token, self.autologin_expires_at) {
            (Some(_), Some(expires_at)) => now < expires_at,
            _ => false,
        }
    }
}

/// Insert shape of an [`Account`]; the store assigns the identifier.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub name: String,
    pub slug: String,
    pub gender: Option<Gender>,
    pub salt: String,
    pub hashed_secret: String,
    pub activation_token: String,
    pub blocked: bool,
    pub roles: BTreeSet<RoleSlug>,
    pub created_at: DateTime<Utc>,
}

impl NewAccount {
    /// Materializes the stored [`Account`] once the store assigned `id`.
    pub fn into_account(self, id: AccountId) -> Account {
        Account {
            id,
            email: self.email,
            pending_email: None,
            pending_email_token: None,
            name: self.name,
            slug: self.slug,
            gender: self.gender,
            salt: self.salt,
            hashed_secret: self.hashed_secret,
            activation_token: Some(self.activation_token),
            activated: false,
            activated_at: None,
            blocked: self.blocked,
            autologin_token: None,
            autologin_expires_at: None,
            login_count: 0,
            current_ip: None,
            last_ip: None,
            last_failed_ip: None,
            current_login_at: None,
            last_login_at: None,
            last_failed_login_at: None,
            roles: self.roles,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    fn account() -> Account {
        NewAccount {
            email: "bob@bob.com".into(),
            name: String::new(),
            slug: String::new(),
            gender: None,
            salt: "0123456789".into(),
            hashed_secret: "deadbeef".into(),
            activation_token: "token".into(),
            blocked: false,
            roles: BTreeSet::new(),
            created_at: Utc::now(),
        }
        .into_account(AccountId::new(1))
    }

    #[test]
    fn test_new_account_starts_unactivated() {
        let account = account();
        assert!(!account.activated);
        assert_eq!(account.activation_token.as_deref(), Some("token"));
        assert_eq!(account.login_count, 0);
    }

    #[test]
    fn test_autologin_validity() {
        let mut account = account();
        let now = Utc::now();
        assert!(!account.autologin_valid_at(now));

        account.autologin_token = Some("t".into());
        account.autologin_expires_at = Some(now + TimeDelta::days(30));
        assert!(account.autologin_valid_at(now));
        assert!(!account.autologin_valid_at(now + TimeDelta::days(31)));
    }

    #[test]
    fn test_gender_round_trip() {
        assert_eq!(Gender::parse("m"), Some(Gender::Male));
        assert_eq!(Gender::parse("x"), None);
        assert_eq!(Gender::Female.as_str(), "f");
    }
}
