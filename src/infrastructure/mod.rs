//! Infrastructure layer - Concrete implementations of the domain boundaries

pub mod account;

pub use account::{
    ActivationService, Argon2Hasher, AuthenticationService, CreateAccountRequest,
    CreateAccountResult, CredentialHasher, InMemoryAccountStore, PasswordResetService,
    TokenGenerator, TokenIssuer, MIN_TOKEN_BYTES,
};
