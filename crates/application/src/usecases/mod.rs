//! Application services implementing the account workflows.

use domain::validate::Violations;

use crate::error::WorkflowError;
use crate::ports::outbound::StoreError;

pub mod admin;
pub mod auth;
pub mod autologin;
pub mod email;
pub mod password;
pub mod profile;
pub mod register;
pub mod roles;

pub use admin::*;
pub use auth::*;
pub use autologin::*;
pub use email::*;
pub use password::*;
pub use profile::*;
pub use register::*;
pub use roles::*;

/// Canonical form of an email address for lookups and storage.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub(crate) fn taken_message(field: &str) -> &'static str {
    match field {
        "email" | "pending_email" => {
            "an account with this email address already exists"
        },
        "name" | "slug" => "an account with this name already exists",
        _ => "is already taken",
    }
}

/// Folds a storage-level unique violation back into the same
/// field-scoped failure a validator precheck would have produced;
/// everything else stays a store error.
pub(crate) fn fold_unique<F>(err: StoreError, wrap: F) -> WorkflowError
where
    F: FnOnce(Violations) -> WorkflowError,
{
    match err {
        StoreError::UniqueViolation { field } => {
            let mut violations = Violations::new();
            violations.push(field, taken_message(field));
            wrap(violations)
        },
        other => WorkflowError::Store(other),
    }
}
