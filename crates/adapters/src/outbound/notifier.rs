//! Notification dispatch adapters.

use std::sync::Mutex;

use application::ports::outbound::{Notifier, NotifyError};
use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc;

/// A notification event as handed to the delivery worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    Welcome {
        to: String,
        password: String,
        activation_token: String,
    },
    ActivationCode {
        to: String,
        activation_token: String,
    },
    ForgotPassword {
        to: String,
        password: String,
    },
    PasswordChanged {
        to: String,
        password: String,
    },
    EmailChangeActivation {
        to: String,
        token: String,
    },
}

impl Notification {
    /// Address the notification is delivered to.
    pub fn recipient(&self) -> &str {
        match self {
            Self::Welcome { to, .. }
            | Self::ActivationCode { to, .. }
            | Self::ForgotPassword { to, .. }
            | Self::PasswordChanged { to, .. }
            | Self::EmailChangeActivation { to, .. } => to,
        }
    }
}

/// Queue-publishing notifier.
///
/// Events are pushed onto an in-process channel that a delivery worker
/// drains towards the mail service; delivery is at-least-once there,
/// which is safe because every token-bearing notification only resends
/// a still-valid token.
pub struct QueueNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl QueueNotifier {
    /// Creates the notifier together with the receiving end the
    /// delivery worker consumes.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn publish(&self, event: Notification) -> Result<(), NotifyError> {
        tracing::debug!(recipient = event.recipient(), "notification queued");
        self.tx
            .send(event)
            .map_err(|_| NotifyError("delivery queue closed".into()))
    }
}

#[async_trait]
impl Notifier for QueueNotifier {
    async fn send_welcome(
        &self,
        email: &str,
        password: &str,
        activation_token: &str,
    ) -> Result<(), NotifyError> {
        self.publish(Notification::Welcome {
            to: email.into(),
            password: password.into(),
            activation_token: activation_token.into(),
        })
    }

    async fn send_activation_code(
        &self,
        email: &str,
        activation_token: &str,
    ) -> Result<(), NotifyError> {
        self.publish(Notification::ActivationCode {
            to: email.into(),
            activation_token: activation_token.into(),
        })
    }

    async fn send_forgot_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(), NotifyError> {
        self.publish(Notification::ForgotPassword {
            to: email.into(),
            password: password.into(),
        })
    }

    async fn send_password_changed(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(), NotifyError> {
        self.publish(Notification::PasswordChanged {
            to: email.into(),
            password: password.into(),
        })
    }

    async fn send_email_change_activation(
        &self,
        new_email: &str,
        token: &str,
    ) -> Result<(), NotifyError> {
        self.publish(Notification::EmailChangeActivation {
            to: new_email.into(),
            token: token.into(),
        })
    }
}

/// Recording notifier for tests: the captured deliveries stand in for
/// a mailbox assertions read passwords and tokens out of.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything delivered so far, oldest first.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().expect("notifier lock poisoned").clone()
    }

    /// The most recent delivery.
    pub fn last(&self) -> Option<Notification> {
        self.sent().pop()
    }

    fn record(&self, event: Notification) -> Result<(), NotifyError> {
        self.sent.lock().expect("notifier lock poisoned").push(event);
        Ok(())
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_welcome(
        &self,
        email: &str,
        password: &str,
        activation_token: &str,
    ) -> Result<(), NotifyError> {
        self.record(Notification::Welcome {
            to: email.into(),
            password: password.into(),
            activation_token: activation_token.into(),
        })
    }

    async fn send_activation_code(
        &self,
        email: &str,
        activation_token: &str,
    ) -> Result<(), NotifyError> {
        self.record(Notification::ActivationCode {
            to: email.into(),
            activation_token: activation_token.into(),
        })
    }

    async fn send_forgot_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(), NotifyError> {
        self.record(Notification::ForgotPassword {
            to: email.into(),
            password: password.into(),
        })
    }

    async fn send_password_changed(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(), NotifyError> {
        self.record(Notification::PasswordChanged {
            to: email.into(),
            password: password.into(),
        })
    }

    async fn send_email_change_activation(
        &self,
        new_email: &str,
        token: &str,
    ) -> Result<(), NotifyError> {
        self.record(Notification::EmailChangeActivation {
            to: new_email.into(),
            token: token.into(),
        })
    }
}
