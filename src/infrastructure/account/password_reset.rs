//! Password reset token flow

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::account::{Account, AccountId, AccountPolicy, AccountStore};
use crate::domain::clock::Clock;
use crate::domain::notifier::Notifier;
use crate::domain::{AuthError, IssuedToken, TokenKind};

use super::credential::CredentialHasher;
use super::token::{TokenGenerator, TokenIssuer};

/// Password reset service
///
/// Reset tokens are single-use and expire after the policy window. Only
/// the most recently issued token can ever match.
#[derive(Debug)]
pub struct PasswordResetService<S, H, N, C>
where
    S: AccountStore,
    H: CredentialHasher,
    N: Notifier,
    C: Clock,
{
    store: Arc<S>,
    hasher: Arc<H>,
    issuer: TokenIssuer<H>,
    notifier: Arc<N>,
    clock: Arc<C>,
    policy: AccountPolicy,
}

impl<S, H, N, C> PasswordResetService<S, H, N, C>
where
    S: AccountStore,
    H: CredentialHasher,
    N: Notifier,
    C: Clock,
{
    /// Create a new password reset service
    pub fn new(
        store: Arc<S>,
        hasher: Arc<H>,
        notifier: Arc<N>,
        clock: Arc<C>,
        policy: AccountPolicy,
    ) -> Self {
        Self {
            store,
            hasher: hasher.clone(),
            issuer: TokenIssuer::new(TokenGenerator::new(), hasher),
            notifier,
            clock,
            policy,
        }
    }

    /// Create with a custom token generator
    pub fn with_generator(mut self, generator: TokenGenerator) -> Self {
        self.issuer = TokenIssuer::new(generator, self.hasher.clone());
        self
    }

    /// Issue a password reset token
    ///
    /// The digest and the send timestamp land in one update, and any
    /// earlier reset token stops matching.
    pub async fn create_reset(&self, id: &AccountId) -> Result<IssuedToken, AuthError> {
        let mut account = self.get_account(id).await?;

        let token = self.issuer.issue(TokenKind::Reset)?;
        account.set_reset_digest(token.digest(), self.clock.now());

        let account = self.store.update(&account).await?;

        info!("Password reset token issued: account={}", account.id());

        if let Err(e) = self
            .notifier
            .send_password_reset_email(&account, &token)
            .await
        {
            warn!("Failed to send password reset email: {}", e);
        }

        Ok(token)
    }

    /// Whether the account's current reset token has aged out
    pub fn reset_expired(&self, account: &Account) -> bool {
        account.reset_expired(self.clock.now(), self.policy.reset_window())
    }

    /// Set a new password using a reset token
    ///
    /// The token must match the stored digest and still be inside the
    /// validity window; a matching but stale token reports `TokenExpired`.
    /// The new password passes the same validation as at signup, and the
    /// digest is cleared so the token cannot be used twice.
    pub async fn reset_password(
        &self,
        id: &AccountId,
        token: &str,
        new_password: &str,
    ) -> Result<Account, AuthError> {
        let mut account = self.get_account(id).await?;

        if !self.issuer.matches(token, account.digest(TokenKind::Reset)) {
            debug!("Password reset refused: token mismatch for account {}", account.id());
            return Err(AuthError::InvalidToken);
        }

        if self.reset_expired(&account) {
            debug!("Password reset refused: token expired for account {}", account.id());
            return Err(AuthError::TokenExpired);
        }

        self.policy.validate_password(new_password)?;

        let password_digest = self.hasher.hash(new_password)?;
        let now = self.clock.now();

        account.set_password_digest(password_digest, now);
        account.clear_reset_digest(now);

        let account = self.store.update(&account).await?;

        info!("Password reset completed: account={}", account.id());

        Ok(account)
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AuthError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AuthError::not_found(format!("Account '{}' not found", id)))
    }
}
