//! Input and output shapes of the workflows.
//!
//! The self-service and privileged field sets are disjoint types on
//! purpose: untrusted input deserializes into [`ProfileUpdate`] and can
//! never reach `activated`/`blocked`.

use domain::account::{Account, Gender};

/// Registration submission.
#[derive(Debug, Clone, Default)]
pub struct RegisterRequest {
    pub email: String,
    /// Optional display name; administrators may prefill it.
    pub name: Option<String>,
    /// Whether the legal notice was accepted, when deployment requires it.
    pub accepted_legal_notice: bool,
}

/// Self-service profile submission.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// `Some` replaces the name (and re-derives the slug); `None`
    /// leaves it untouched.
    pub name: Option<String>,
    pub gender: Option<Gender>,
}

/// Self-service password change submission.
#[derive(Debug, Clone)]
pub struct PasswordChange {
    pub old_password: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Administrative account submission. Only this trusted shape can
/// carry the privileged lifecycle flags.
#[derive(Debug, Clone, Default)]
pub struct AdminAccountUpdate {
    pub activated: Option<bool>,
    pub blocked: Option<bool>,
    pub name: Option<String>,
    pub gender: Option<Gender>,
    /// Blank or absent means "no change", never "set to empty".
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

/// Outcome of the per-request current-account resolution.
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    pub account: Account,
    /// Set when the account was recovered from the autologin cookie and
    /// the web adapter should now store its id in the session.
    pub promote_to_session: bool,
}
