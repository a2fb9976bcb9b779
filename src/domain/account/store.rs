//! Account store trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Account, AccountId};
use crate::domain::AuthError;

/// Storage boundary for accounts
///
/// Implementations must enforce case-insensitive email uniqueness at write
/// time and replace the whole record on update, so digest fields and their
/// timestamps are never half-written.
#[async_trait]
pub trait AccountStore: Send + Sync + Debug {
    /// Get an account by its ID
    async fn get(&self, id: &AccountId) -> Result<Option<Account>, AuthError>;

    /// Get an account by email, matching case-insensitively
    async fn get_by_email(&self, email: &str) -> Result<Option<Account>, AuthError>;

    /// Create a new account
    async fn create(&self, account: Account) -> Result<Account, AuthError>;

    /// Update an existing account
    async fn update(&self, account: &Account) -> Result<Account, AuthError>;

    /// Check whether an email address is taken
    async fn email_taken(&self, email: &str) -> Result<bool, AuthError> {
        Ok(self.get_by_email(email).await?.is_some())
    }
}
