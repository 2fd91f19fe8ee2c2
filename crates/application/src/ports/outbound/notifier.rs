//! Interface for notification dispatch.

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
#[error("notification dispatch failed: {0}")]
pub struct NotifyError(pub String);

/// Port for sending account notifications.
///
/// Dispatch is decoupled from the workflow transaction: adapters may
/// queue with at-least-once delivery, and every token-bearing flow is
/// safely replayable because redelivery only resends a still-valid
/// token. Workflows therefore treat a failed send as a warning, not a
/// workflow failure.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Welcome message for a fresh registration, carrying the generated
    /// password and the activation code.
    async fn send_welcome(
        &self,
        email: &str,
        password: &str,
        activation_token: &str,
    ) -> Result<(), NotifyError>;

    /// Re-delivery of an existing activation code.
    async fn send_activation_code(
        &self,
        email: &str,
        activation_token: &str,
    ) -> Result<(), NotifyError>;

    /// Replacement password from the forgot-password flow; the last
    /// time this plaintext is visible anywhere.
    async fn send_forgot_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(), NotifyError>;

    /// Confirmation of a self-service password change.
    async fn send_password_changed(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(), NotifyError>;

    /// Email-change activation link, sent to the candidate address.
    async fn send_email_change_activation(
        &self,
        new_email: &str,
        token: &str,
    ) -> Result<(), NotifyError>;
}
