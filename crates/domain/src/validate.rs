//! Field-level validation rules.
//!
//! Every rule appends to a [`Violations`] collector instead of failing
//! fast, so a caller can render all problems of a submission at once.
//! Uniqueness is not checked here; workflows ask the store and the
//! store enforces it again with constraints.

use std::fmt;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex_lite::Regex;

/// Allowed email length, in characters.
pub const EMAIL_LENGTH: RangeInclusive<usize> = 5..=120;
/// Allowed password length, in characters.
pub const PASSWORD_LENGTH: RangeInclusive<usize> = 5..=40;
/// Allowed display-name length, in characters.
pub const NAME_LENGTH: RangeInclusive<usize> = 3..=30;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[^@\s]+@(?:[-a-z0-9]+\.)+[a-z]{2,}$")
        .expect("email pattern must compile")
});

/// A single field-scoped validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collected validation failures of one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<FieldError>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure against `field`.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Whether any failure was recorded against `field`.
    pub fn contains_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

/// How a password submission is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordContext {
    /// A password must be supplied.
    Required,
    /// Blank means "no change"; the rules only apply when supplied.
    Optional,
}

/// Validates an email address: required, length-bound, single-`@`
/// domain-dotted format.
pub fn email(violations: &mut Violations, value: &str) {
    email_field(violations, "email", value);
}

/// Validates a candidate address for an email change. Same format rules
/// as [`email`]; blankness is rejected earlier, as a missing argument.
pub fn pending_email(violations: &mut Violations, value: &str) {
    email_field(violations, "pending_email", value);
}

fn email_field(violations: &mut Violations, field: &'static str, value: &str) {
    if value.is_empty() {
        violations.push(field, "email address is required");
        return;
    }

    let length = value.chars().count();
    if length < *EMAIL_LENGTH.start() {
        violations.push(field, "email address is too short (minimum 5 characters)");
    } else if length > *EMAIL_LENGTH.end() {
        violations.push(field, "email address is too long (maximum 120 characters)");
    } else if !EMAIL_RE.is_match(value) {
        violations.push(field, "email address is malformed");
    }
}

/// Validates a password submission together with its confirmation.
///
/// In [`PasswordContext::Optional`] a blank password is "no change" and
/// passes untouched; the confirmation is only compared when supplied.
pub fn password(
    violations: &mut Violations,
    context: PasswordContext,
    value: &str,
    confirmation: Option<&str>,
) {
    if value.is_empty() {
        if context == PasswordContext::Required {
            violations.push("password", "password is required");
        }
        return;
    }

    let length = value.chars().count();
    if length < *PASSWORD_LENGTH.start() {
        violations.push("password", "password is too short (minimum 5 characters)");
    } else if length > *PASSWORD_LENGTH.end() {
        violations.push("password", "password is too long (maximum 40 characters)");
    }

    if confirmation.is_some_and(|c| c != value) {
        violations.push("password", "password confirmation does not match");
    }
}

/// Validates a display name. Blank is allowed (the profile is simply
/// not filled in yet); a non-blank name is length-bound and restricted
/// to alphanumerics, space, hyphen, underscore and accented letters.
pub fn name(violations: &mut Violations, value: &str) {
    if value.is_empty() {
        return;
    }

    let length = value.chars().count();
    if length < *NAME_LENGTH.start() {
        violations.push("name", "name is too short (minimum 3 characters)");
        return;
    }
    if length > *NAME_LENGTH.end() {
        violations.push("name", "name is too long (maximum 30 characters)");
        return;
    }

    if !value.chars().all(name_char_allowed) {
        violations.push("name", "name contains forbidden characters");
    }
}

fn name_char_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, ' ' | '-' | '_')
        || "ąćęłńóśźżĄĆĘŁŃÓŚŹŻ".contains(c)
}
