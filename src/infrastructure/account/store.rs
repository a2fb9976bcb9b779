//! In-memory account store implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::{
    normalize_email, Account, AccountId, AccountStore, AccountValidationError,
};
use crate::domain::AuthError;

/// In-memory implementation of AccountStore
///
/// Email uniqueness is checked and claimed under the write locks, so
/// concurrent creates cannot both take an address. Updates replace the
/// whole record, keeping digest fields and their timestamps together.
#[derive(Debug)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
    /// Index for lower-cased email -> account ID lookup
    email_index: Arc<RwLock<HashMap<String, AccountId>>>,
}

impl InMemoryAccountStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            email_index: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a store with initial accounts
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        let mut accounts_map = HashMap::new();
        let mut email_map = HashMap::new();

        for account in accounts {
            let id = *account.id();
            email_map.insert(account.email().to_string(), id);
            accounts_map.insert(id, account);
        }

        Self {
            accounts: Arc::new(RwLock::new(accounts_map)),
            email_index: Arc::new(RwLock::new(email_map)),
        }
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn get(&self, id: &AccountId) -> Result<Option<Account>, AuthError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Account>, AuthError> {
        let email = normalize_email(email);

        // Writers take accounts before email_index, so the index guard must
        // be released before the accounts lock is taken
        let id = {
            let email_index = self.email_index.read().await;
            email_index.get(&email).copied()
        };

        match id {
            Some(id) => {
                let accounts = self.accounts.read().await;
                Ok(accounts.get(&id).cloned())
            }
            None => Ok(None),
        }
    }

    async fn create(&self, account: Account) -> Result<Account, AuthError> {
        let mut accounts = self.accounts.write().await;
        let mut email_index = self.email_index.write().await;

        let id = *account.id();
        let email = account.email().to_string();

        if accounts.contains_key(&id) {
            return Err(AuthError::storage(format!(
                "Account with ID '{}' already exists",
                id
            )));
        }

        if email_index.contains_key(&email) {
            return Err(AuthError::Validation(AccountValidationError::EmailTaken));
        }

        email_index.insert(email, id);
        accounts.insert(id, account.clone());

        Ok(account)
    }

    async fn update(&self, account: &Account) -> Result<Account, AuthError> {
        let mut accounts = self.accounts.write().await;
        let mut email_index = self.email_index.write().await;

        let id = *account.id();

        let old_email = match accounts.get(&id) {
            Some(existing) => existing.email().to_string(),
            None => {
                return Err(AuthError::not_found(format!("Account '{}' not found", id)));
            }
        };

        let new_email = account.email().to_string();

        // If the email changed, check uniqueness and reindex
        if old_email != new_email {
            if email_index.contains_key(&new_email) {
                return Err(AuthError::Validation(AccountValidationError::EmailTaken));
            }

            email_index.remove(&old_email);
            email_index.insert(new_email, id);
        }

        accounts.insert(id, account.clone());

        Ok(account.clone())
    }
}
