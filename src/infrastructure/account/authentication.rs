//! Login verification and remember-me session tokens

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::account::{normalize_email, Account, AccountId, AccountStore};
use crate::domain::clock::Clock;
use crate::domain::{AuthError, IssuedToken, TokenKind};

use super::credential::CredentialHasher;
use super::token::{TokenGenerator, TokenIssuer};

/// Authentication service for login checks and remember-me tokens
#[derive(Debug)]
pub struct AuthenticationService<S, H, C>
where
    S: AccountStore,
    H: CredentialHasher,
    C: Clock,
{
    store: Arc<S>,
    hasher: Arc<H>,
    issuer: TokenIssuer<H>,
    clock: Arc<C>,
}

impl<S, H, C> AuthenticationService<S, H, C>
where
    S: AccountStore,
    H: CredentialHasher,
    C: Clock,
{
    /// Create a new authentication service
    pub fn new(store: Arc<S>, hasher: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            store,
            hasher: hasher.clone(),
            issuer: TokenIssuer::new(TokenGenerator::new(), hasher),
            clock,
        }
    }

    /// Create with a custom token generator
    pub fn with_generator(mut self, generator: TokenGenerator) -> Self {
        self.issuer = TokenIssuer::new(generator, self.hasher.clone());
        self
    }

    /// Verify an email/password pair
    ///
    /// Unknown email and wrong password are indistinguishable from the
    /// outside; both come back as `InvalidCredentials`. Valid credentials
    /// on an account with an unconfirmed email yield `NotActivated`.
    /// Session establishment is the caller's job.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        let email = normalize_email(email);

        let account = match self.store.get_by_email(&email).await? {
            Some(account) => account,
            None => {
                debug!("Authentication failed: unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !self.hasher.verify(password, account.password_digest()) {
            debug!("Authentication failed: wrong password for account {}", account.id());
            return Err(AuthError::InvalidCredentials);
        }

        if !account.activated() {
            debug!("Authentication refused: account {} not activated", account.id());
            return Err(AuthError::NotActivated);
        }

        info!("Account authenticated: id={}", account.id());

        Ok(account)
    }

    /// Issue a remember token and store its digest
    ///
    /// Any previously issued remember token stops matching.
    pub async fn remember(&self, id: &AccountId) -> Result<IssuedToken, AuthError> {
        let mut account = self.get_account(id).await?;

        let token = self.issuer.issue(TokenKind::Remember)?;
        account.set_remember_digest(Some(token.digest().to_string()), self.clock.now());

        self.store.update(&account).await?;

        info!("Remember token issued: account={}", account.id());

        Ok(token)
    }

    /// Drop the stored remember digest
    ///
    /// Forgetting an account that was never remembered is a no-op.
    pub async fn forget(&self, id: &AccountId) -> Result<(), AuthError> {
        let mut account = self.get_account(id).await?;

        account.set_remember_digest(None, self.clock.now());
        self.store.update(&account).await?;

        info!("Remember token cleared: account={}", account.id());

        Ok(())
    }

    /// Check a presented remember token against the stored digest
    ///
    /// False immediately when no digest is stored.
    pub fn verify_remember(&self, account: &Account, token: &str) -> bool {
        self.issuer.matches(token, account.digest(TokenKind::Remember))
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AuthError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AuthError::not_found(format!("Account '{}' not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::SystemClock;
    use crate::domain::MockAccountStore;
    use crate::infrastructure::account::credential::Argon2Hasher;
    use crate::infrastructure::account::store::InMemoryAccountStore;
    use chrono::Utc;

    fn create_service() -> (
        AuthenticationService<InMemoryAccountStore, Argon2Hasher, SystemClock>,
        Arc<InMemoryAccountStore>,
        Arc<Argon2Hasher>,
    ) {
        let store = Arc::new(InMemoryAccountStore::new());
        let hasher = Arc::new(Argon2Hasher::test());
        let clock = Arc::new(SystemClock::new());
        let service = AuthenticationService::new(store.clone(), hasher.clone(), clock);
        (service, store, hasher)
    }

    async fn seed_account(
        store: &InMemoryAccountStore,
        hasher: &Argon2Hasher,
        email: &str,
        password: &str,
        activated: bool,
    ) -> Account {
        let digest = hasher.hash(password).unwrap();
        let mut account = Account::new(
            AccountId::generate(),
            "Test Account",
            email,
            "0123456789",
            digest,
            "activation_digest",
            Utc::now(),
        );

        if activated {
            account.activate(Utc::now());
        }

        store.create(account).await.unwrap()
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let (service, store, hasher) = create_service();
        seed_account(&store, &hasher, "user@example.com", "secret1", true).await;

        let account = service
            .authenticate("user@example.com", "secret1")
            .await
            .unwrap();

        assert_eq!(account.email(), "user@example.com");
    }

    #[tokio::test]
    async fn test_authenticate_mixed_case_email() {
        let (service, store, hasher) = create_service();
        seed_account(&store, &hasher, "user@example.com", "secret1", true).await;

        let account = service
            .authenticate("  User@EXAMPLE.com ", "secret1")
            .await
            .unwrap();

        assert_eq!(account.email(), "user@example.com");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
        let (service, store, hasher) = create_service();
        seed_account(&store, &hasher, "user@example.com", "secret1", true).await;

        let wrong_password = service.authenticate("user@example.com", "wrong1").await;
        let unknown_email = service.authenticate("nobody@example.com", "secret1").await;

        assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));
        assert!(matches!(unknown_email, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_unactivated_account() {
        let (service, store, hasher) = create_service();
        seed_account(&store, &hasher, "user@example.com", "secret1", false).await;

        let result = service.authenticate("user@example.com", "secret1").await;
        assert!(matches!(result, Err(AuthError::NotActivated)));
    }

    #[tokio::test]
    async fn test_unactivated_account_with_wrong_password() {
        let (service, store, hasher) = create_service();
        seed_account(&store, &hasher, "user@example.com", "secret1", false).await;

        // The password is checked first, so a wrong password never reveals
        // the activation state
        let result = service.authenticate("user@example.com", "wrong1").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_remember_and_verify() {
        let (service, store, hasher) = create_service();
        let account =
            seed_account(&store, &hasher, "user@example.com", "secret1", true).await;

        let token = service.remember(account.id()).await.unwrap();
        assert_eq!(token.kind(), TokenKind::Remember);

        let stored = store.get(account.id()).await.unwrap().unwrap();
        assert!(service.verify_remember(&stored, token.plaintext()));
        assert!(!service.verify_remember(&stored, "wrong_token"));
    }

    #[tokio::test]
    async fn test_remember_with_custom_generator() {
        let (service, store, hasher) = create_service();
        let service = service.with_generator(TokenGenerator::new().with_token_bytes(16));
        let account =
            seed_account(&store, &hasher, "user@example.com", "secret1", true).await;

        let token = service.remember(account.id()).await.unwrap();

        // 16 bytes base64url-encoded without padding = 22 chars
        assert_eq!(token.plaintext().len(), 22);

        let stored = store.get(account.id()).await.unwrap().unwrap();
        assert!(service.verify_remember(&stored, token.plaintext()));
    }

    #[tokio::test]
    async fn test_remember_replaces_previous_token() {
        let (service, store, hasher) = create_service();
        let account =
            seed_account(&store, &hasher, "user@example.com", "secret1", true).await;

        let first = service.remember(account.id()).await.unwrap();
        let second = service.remember(account.id()).await.unwrap();

        let stored = store.get(account.id()).await.unwrap().unwrap();
        assert!(!service.verify_remember(&stored, first.plaintext()));
        assert!(service.verify_remember(&stored, second.plaintext()));
    }

    #[tokio::test]
    async fn test_forget() {
        let (service, store, hasher) = create_service();
        let account =
            seed_account(&store, &hasher, "user@example.com", "secret1", true).await;

        let token = service.remember(account.id()).await.unwrap();
        service.forget(account.id()).await.unwrap();

        let stored = store.get(account.id()).await.unwrap().unwrap();
        assert!(stored.remember_digest().is_none());
        assert!(!service.verify_remember(&stored, token.plaintext()));
    }

    #[tokio::test]
    async fn test_forget_without_remember_is_noop() {
        let (service, store, hasher) = create_service();
        let account =
            seed_account(&store, &hasher, "user@example.com", "secret1", true).await;

        service.forget(account.id()).await.unwrap();
        service.forget(account.id()).await.unwrap();
    }

    #[tokio::test]
    async fn test_verify_remember_without_digest() {
        let (service, store, hasher) = create_service();
        let account =
            seed_account(&store, &hasher, "user@example.com", "secret1", true).await;

        assert!(!service.verify_remember(&account, "any_token"));
    }

    #[tokio::test]
    async fn test_remember_unknown_account() {
        let (service, _store, _hasher) = create_service();

        let result = service.remember(&AccountId::generate()).await;
        assert!(matches!(result, Err(AuthError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_storage_error() {
        let store = Arc::new(MockAccountStore::new());
        let hasher = Arc::new(Argon2Hasher::test());
        let clock = Arc::new(SystemClock::new());
        let service = AuthenticationService::new(store.clone(), hasher, clock);

        store.set_should_fail(true).await;

        let result = service.authenticate("user@example.com", "secret1").await;
        assert!(matches!(result, Err(AuthError::Storage { .. })));
    }
}
