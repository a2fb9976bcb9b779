//! Account domain
//!
//! This module provides domain types for account authentication, including
//! the account entity, field validation, and the storage boundary.

mod entity;
mod store;
mod validation;

pub use entity::{Account, AccountId};
pub use store::AccountStore;
pub use validation::{normalize_email, AccountPolicy, AccountValidationError};

#[cfg(test)]
pub use store::mock::MockAccountStore;
