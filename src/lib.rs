//! Account Authentication Core
//!
//! Credential and token lifecycle logic for user accounts with support for:
//! - Argon2 password hashing with explicit cost profiles
//! - Login verification with indistinguishable credential failures
//! - "Remember me" tokens persisted only as digests
//! - Single-use account activation and password reset tokens
//!
//! Storage, mail delivery, and time are injected collaborators, so the same
//! services run against any backend and stay deterministic under test.

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{AuthConfig, HashProfile};
pub use domain::{
    Account, AccountId, AccountPolicy, AccountStore, AccountValidationError, AuthError, Clock,
    IssuedToken, Notifier, NotifyError, SystemClock, TokenKind,
};
pub use infrastructure::{
    ActivationService, Argon2Hasher, AuthenticationService, CreateAccountRequest,
    CreateAccountResult, CredentialHasher, InMemoryAccountStore, PasswordResetService,
    TokenGenerator, TokenIssuer,
};

use std::sync::Arc;

/// The three account services wired over shared collaborators
///
/// Convenience bundle for hosts that want the full flow with the standard
/// hasher and the system clock.
#[derive(Debug)]
pub struct AuthServices<S, N>
where
    S: AccountStore,
    N: Notifier,
{
    pub authentication: AuthenticationService<S, Argon2Hasher, SystemClock>,
    pub activation: ActivationService<S, Argon2Hasher, N, SystemClock>,
    pub password_reset: PasswordResetService<S, Argon2Hasher, N, SystemClock>,
}

/// Wire the account services from configuration
pub fn build_services<S, N>(
    config: &AuthConfig,
    store: Arc<S>,
    notifier: Arc<N>,
) -> AuthServices<S, N>
where
    S: AccountStore,
    N: Notifier,
{
    let hasher = Arc::new(Argon2Hasher::new(config.hashing.profile));
    let clock = Arc::new(SystemClock::new());

    AuthServices {
        authentication: AuthenticationService::new(store.clone(), hasher.clone(), clock.clone()),
        activation: ActivationService::new(
            store.clone(),
            hasher.clone(),
            notifier.clone(),
            clock.clone(),
            config.policy.clone(),
        ),
        password_reset: PasswordResetService::new(
            store,
            hasher,
            notifier,
            clock,
            config.policy.clone(),
        ),
    }
}
