//! Account signup and email activation

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::account::{
    normalize_email, Account, AccountId, AccountPolicy, AccountStore, AccountValidationError,
};
use crate::domain::clock::Clock;
use crate::domain::notifier::Notifier;
use crate::domain::{AuthError, IssuedToken, TokenKind};

use super::credential::CredentialHasher;
use super::token::{TokenGenerator, TokenIssuer};

/// Request for creating a new account
#[derive(Debug, Clone)]
pub struct CreateAccountRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Result of creating a new account
#[derive(Debug)]
pub struct CreateAccountResult {
    /// The stored account
    pub account: Account,
    /// The activation token (only returned once)
    pub activation_token: IssuedToken,
}

/// Activation service for signup and email confirmation
#[derive(Debug)]
pub struct ActivationService<S, H, N, C>
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

impl<S, H, N, C> ActivationService<S, H, N, C>
where
    S: AccountStore,
    H: CredentialHasher,
    N: Notifier,
    C: Clock,
{
    /// Create a new activation service
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

    /// Create a new, unactivated account
    ///
    /// Validates every field, claims the email address, hashes the password,
    /// and issues the activation token whose digest lives on the account
    /// from the start. The plaintext token is mailed out and returned; it is
    /// the only copy there will ever be.
    pub async fn create_account(
        &self,
        request: CreateAccountRequest,
    ) -> Result<CreateAccountResult, AuthError> {
        self.policy.validate_name(&request.name)?;

        let email = normalize_email(&request.email);
        self.policy.validate_email(&email)?;
        self.policy.validate_phone(&request.phone)?;
        self.policy.validate_password(&request.password)?;

        if self.store.email_taken(&email).await? {
            return Err(AuthError::Validation(AccountValidationError::EmailTaken));
        }

        let password_digest = self.hasher.hash(&request.password)?;
        let activation_token = self.issuer.issue(TokenKind::Activation)?;

        let account = Account::new(
            AccountId::generate(),
            &request.name,
            &email,
            &request.phone,
            password_digest,
            activation_token.digest(),
            self.clock.now(),
        );

        let account = self.store.create(account).await?;

        info!("Account created: id={}", account.id());

        if let Err(e) = self
            .notifier
            .send_activation_email(&account, &activation_token)
            .await
        {
            warn!("Failed to send activation email: {}", e);
        }

        Ok(CreateAccountResult {
            account,
            activation_token,
        })
    }

    /// Confirm an account's email address
    ///
    /// A token that does not match the stored digest changes nothing.
    /// Re-activating with the still-valid token is a no-op success;
    /// `activated_at` keeps its original value.
    pub async fn activate(&self, id: &AccountId, token: &str) -> Result<Account, AuthError> {
        let mut account = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| AuthError::not_found(format!("Account '{}' not found", id)))?;

        if !self.issuer.matches(token, account.digest(TokenKind::Activation)) {
            debug!("Activation refused: token mismatch for account {}", account.id());
            return Err(AuthError::InvalidToken);
        }

        if account.activated() {
            debug!("Account {} already activated", account.id());
            return Ok(account);
        }

        account.activate(self.clock.now());
        let account = self.store.update(&account).await?;

        info!("Account activated: id={}", account.id());

        Ok(account)
    }
}
