//! Read-only configuration, constructed once at startup.

use chrono::TimeDelta;
use domain::role::{Role, RoleSlug};
use serde::Deserialize;

const DEFAULT_AUTOLOGIN_TTL_DAYS: i64 = 30;
const DEFAULT_SALT_LENGTH: usize = 10;
const DEFAULT_GENERATED_PASSWORD_LENGTH: usize = 10;

/// Immutable settings shared by every use case.
///
/// Deserialized from YAML at startup; every field has a default so a
/// deployment only overrides what it cares about.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// The full set of roles accounts can be assigned to.
    pub roles: Vec<Role>,
    /// Role assigned to every freshly registered account.
    pub default_role: RoleSlug,
    /// Days an autologin token stays valid.
    pub autologin_ttl_days: i64,
    /// Characters of generated salts.
    pub salt_length: usize,
    /// Characters of generated plaintext passwords.
    pub generated_password_length: usize,
    /// Where the web adapter sends users after a completed action.
    pub default_redirect: String,
    /// Whether registration requires accepting the legal notice.
    pub require_legal_acceptance: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            roles: vec![
                Role::new("user", "User"),
                Role::new("administrator", "Administrator"),
                Role::new("editor", "Editor"),
                Role::new("moderator", "Moderator"),
            ],
            default_role: RoleSlug::new("user"),
            autologin_ttl_days: DEFAULT_AUTOLOGIN_TTL_DAYS,
            salt_length: DEFAULT_SALT_LENGTH,
            generated_password_length: DEFAULT_GENERATED_PASSWORD_LENGTH,
            default_redirect: "/".into(),
            require_legal_acceptance: false,
        }
    }
}

impl Settings {
    /// Parses settings from a YAML document.
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }

    /// Looks a configured role up by slug.
    pub fn role(&self, slug: &RoleSlug) -> Option<&Role> {
        self.roles.iter().find(|role| &role.slug == slug)
    }

    /// The autologin validity window.
    pub fn autologin_ttl(&self) -> TimeDelta {
        TimeDelta::days(self.autologin_ttl_days)
    }
}
