//! Configuration loading
//!
//! Layered configuration in the usual order: bundled defaults, an optional
//! local file, then `AUTH__`-prefixed environment variables.

mod auth_config;

pub use auth_config::{AuthConfig, HashProfile, HashingConfig};
