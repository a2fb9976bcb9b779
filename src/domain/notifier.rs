//! Outbound notification boundary

use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

use super::account::Account;
use super::token::IssuedToken;

/// Errors that can occur during notification delivery
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Delivery failed: {message}")]
    Delivery { message: String },
}

impl NotifyError {
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }
}

/// Boundary for account mail delivery
///
/// Implementations render and send the actual messages. The services treat
/// delivery as best-effort: a failure is logged, never surfaced to the
/// caller of the operation that triggered it.
#[async_trait]
pub trait Notifier: Send + Sync + Debug {
    /// Send the activation message carrying the one-time token
    async fn send_activation_email(
        &self,
        account: &Account,
        token: &IssuedToken,
    ) -> Result<(), NotifyError>;

    /// Send the password reset message carrying the one-time token
    async fn send_password_reset_email(
        &self,
        account: &Account,
        token: &IssuedToken,
    ) -> Result<(), NotifyError>;
}
