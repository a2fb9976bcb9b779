//! Token kinds and the issued token value object

use std::fmt;

/// The account token families
///
/// Each kind lives on the account as its own digest column and goes through
/// the same issue-once, verify-by-digest mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// One-time token mailed at signup to confirm the address
    Activation,
    /// Long-lived "remember me" session token
    Remember,
    /// One-time, expiring password reset token
    Reset,
}

impl TokenKind {
    /// Stable lowercase name for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activation => "activation",
            Self::Remember => "remember",
            Self::Reset => "reset",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A freshly issued token pair
///
/// The plaintext is handed to the account holder exactly once; only the
/// digest is ever persisted. The type implements neither `Serialize` nor
/// `Deserialize`, so the plaintext cannot end up in storage by accident.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    kind: TokenKind,
    plaintext: String,
    digest: String,
}

impl IssuedToken {
    pub(crate) fn new(
        kind: TokenKind,
        plaintext: impl Into<String>,
        digest: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            plaintext: plaintext.into(),
            digest: digest.into(),
        }
    }

    // Getters

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The secret value to deliver to the account holder
    pub fn plaintext(&self) -> &str {
        &self.plaintext
    }

    /// The digest to persist in place of the plaintext
    pub fn digest(&self) -> &str {
        &self.digest
    }
}
