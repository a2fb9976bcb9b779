//! Account infrastructure module
//!
//! This module provides the working parts of account authentication:
//! Argon2 credential hashing, token issuance, the in-memory store, and the
//! authentication, activation, and password reset services.

mod activation;
mod authentication;
mod credential;
mod password_reset;
mod store;
mod token;

pub use activation::{ActivationService, CreateAccountRequest, CreateAccountResult};
pub use authentication::AuthenticationService;
pub use credential::{Argon2Hasher, CredentialHasher};
pub use password_reset::PasswordResetService;
pub use store::InMemoryAccountStore;
pub use token::{TokenGenerator, TokenIssuer, MIN_TOKEN_BYTES};
