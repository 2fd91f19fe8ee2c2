//! Roles and their slugs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a role, used in every authorization check.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RoleSlug(String);

impl RoleSlug {
    /// Creates a new [`RoleSlug`], lowercased.
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into().to_lowercase())
    }

    /// Returns the same string as a string slice `&str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RoleSlug {
    fn from(slug: &str) -> Self {
        Self::new(slug)
    }
}

/// A named permission group an account can belong to.
///
/// The set of roles is external configuration, not code; authorization
/// is a set-membership check on [`RoleSlug`], never a hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub slug: RoleSlug,
    /// Human-readable name shown in administrative listings.
    pub name: String,
}

impl Role {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: RoleSlug::new(slug),
            name: name.into(),
        }
    }
}
