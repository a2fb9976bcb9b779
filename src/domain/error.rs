use thiserror::Error;

use crate::domain::account::AccountValidationError;

/// Core authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Validation error: {0}")]
    Validation(#[from] AccountValidationError),

    /// Unknown email and wrong password are deliberately the same error
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Credentials were valid but the email address is unconfirmed
    #[error("Account is not activated")]
    NotActivated,

    /// Presented token does not match the stored digest, or none is stored
    #[error("Invalid token")]
    InvalidToken,

    /// Reset token matched but its validity window has elapsed
    #[error("Token has expired")]
    TokenExpired,

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AuthError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
