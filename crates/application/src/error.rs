//! Workflow errors.
//!
//! These are returned values, not panics: callers branch on the kind.
//! The five field-scoped kinds carry the collected [`Violations`] so a
//! caller can render every problem of a submission at once.

use domain::role::RoleSlug;
use domain::validate::Violations;

use crate::ports::outbound::{CryptoError, StoreError};

pub type Result<T> = std::result::Result<T, WorkflowError>;

/// Errors surfaced by the account workflows.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("no account with this email address")]
    UnauthorizedWrongEmail,
    #[error("wrong password")]
    UnauthorizedWrongPassword,
    #[error("account has not been activated")]
    UnauthorizedNotActivated,
    #[error("account is blocked")]
    UnauthorizedAccountBlocked,

    #[error("unknown activation code")]
    BadActivationCode,
    #[error("account is already activated")]
    AlreadyActivated,

    #[error("registration failed: {0}")]
    NotRegistered(Violations),
    #[error("password has not been changed: {0}")]
    PasswordNotChanged(Violations),
    #[error("profile has not been updated: {0}")]
    ProfileNotUpdated(Violations),
    #[error("account has not been updated: {0}")]
    UserNotUpdated(Violations),
    #[error("email address has not been changed: {0}")]
    EmailNotChanged(Violations),

    #[error("missing required role `{role}`")]
    MissingRole { role: RoleSlug },

    #[error("{0}")]
    InvalidArgument(&'static str),
    #[error("account not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

impl WorkflowError {
    /// The field-scoped failures attached to this error, if any.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::NotRegistered(v)
            | Self::PasswordNotChanged(v)
            | Self::ProfileNotUpdated(v)
            | Self::UserNotUpdated(v)
            | Self::EmailNotChanged(v) => Some(v),
            _ => None,
        }
    }
}
