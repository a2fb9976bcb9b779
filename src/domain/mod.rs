//! Domain layer - Core entities and collaborator boundaries

pub mod account;
pub mod clock;
pub mod error;
pub mod notifier;
pub mod token;

pub use account::{
    normalize_email, Account, AccountId, AccountPolicy, AccountStore, AccountValidationError,
};
pub use clock::{Clock, SystemClock};
pub use error::AuthError;
pub use notifier::{Notifier, NotifyError};
pub use token::{IssuedToken, TokenKind};

#[cfg(test)]
pub use account::MockAccountStore;
#[cfg(test)]
pub use clock::mock::FixedClock;
#[cfg(test)]
pub use notifier::mock::RecordingNotifier;
