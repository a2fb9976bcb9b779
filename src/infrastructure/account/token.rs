//! Token generation and digest verification
//!
//! One mechanism backs all three token families: a random URL-safe value
//! handed out once, stored only as a digest, verified by re-hashing.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use std::sync::Arc;

use crate::domain::{AuthError, IssuedToken, TokenKind};

use super::credential::CredentialHasher;

/// Fewest random bytes a token may carry (22 encoded characters)
pub const MIN_TOKEN_BYTES: usize = 16;

const DEFAULT_TOKEN_BYTES: usize = 32;

/// Generator for secure, URL-safe tokens
#[derive(Debug, Clone)]
pub struct TokenGenerator {
    /// Number of random bytes per token
    token_bytes: usize,
}

impl TokenGenerator {
    /// Create a generator with the default token size
    pub fn new() -> Self {
        Self {
            token_bytes: DEFAULT_TOKEN_BYTES,
        }
    }

    /// Set the number of random bytes, clamped to the minimum
    pub fn with_token_bytes(mut self, bytes: usize) -> Self {
        self.token_bytes = bytes.max(MIN_TOKEN_BYTES);
        self
    }

    /// Generate a fresh token
    pub fn generate(&self) -> String {
        let mut random_bytes = vec![0u8; self.token_bytes];
        rand::thread_rng().fill_bytes(&mut random_bytes);

        URL_SAFE_NO_PAD.encode(&random_bytes)
    }
}

impl Default for TokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Issues tokens and checks presented tokens against stored digests
///
/// Every service that touches account tokens goes through one issuer, so
/// issuance and verification can never drift apart.
#[derive(Debug)]
pub struct TokenIssuer<H: CredentialHasher> {
    generator: TokenGenerator,
    hasher: Arc<H>,
}

impl<H: CredentialHasher> TokenIssuer<H> {
    /// Create a new token issuer
    pub fn new(generator: TokenGenerator, hasher: Arc<H>) -> Self {
        Self { generator, hasher }
    }

    /// Issue a token of the given kind
    ///
    /// Returns the plaintext together with the digest to store in its
    /// place; the plaintext cannot be reconstructed afterwards.
    pub fn issue(&self, kind: TokenKind) -> Result<IssuedToken, AuthError> {
        let plaintext = self.generator.generate();
        let digest = self.hasher.hash(&plaintext)?;

        Ok(IssuedToken::new(kind, plaintext, digest))
    }

    /// Check a presented token against a stored digest
    ///
    /// A missing digest never matches.
    pub fn matches(&self, token: &str, digest: Option<&str>) -> bool {
        match digest {
            Some(digest) => self.hasher.verify(token, digest),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::account::credential::Argon2Hasher;

    fn create_issuer() -> TokenIssuer<Argon2Hasher> {
        TokenIssuer::new(TokenGenerator::new(), Arc::new(Argon2Hasher::test()))
    }

    #[test]
    fn test_generate_token_length() {
        let generator = TokenGenerator::new();

        // 32 bytes base64url-encoded without padding = 43 chars
        assert_eq!(generator.generate().len(), 43);
    }

    #[test]
    fn test_tokens_are_unique() {
        let generator = TokenGenerator::new();

        assert_ne!(generator.generate(), generator.generate());
    }

    #[test]
    fn test_tokens_are_url_safe() {
        let generator = TokenGenerator::new();
        let token = generator.generate();

        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_token_bytes_clamped_to_minimum() {
        let generator = TokenGenerator::new().with_token_bytes(4);

        // 16 bytes base64url-encoded without padding = 22 chars
        assert_eq!(generator.generate().len(), 22);
    }

    #[test]
    fn test_custom_token_bytes() {
        let generator = TokenGenerator::new().with_token_bytes(64);

        // 64 bytes base64url-encoded without padding = 86 chars
        assert_eq!(generator.generate().len(), 86);
    }

    #[test]
    fn test_issue_and_match() {
        let issuer = create_issuer();

        let token = issuer.issue(TokenKind::Remember).unwrap();

        assert_eq!(token.kind(), TokenKind::Remember);
        assert!(issuer.matches(token.plaintext(), Some(token.digest())));
        assert!(!issuer.matches("wrong_token", Some(token.digest())));
    }

    #[test]
    fn test_digest_differs_from_plaintext() {
        let issuer = create_issuer();

        let token = issuer.issue(TokenKind::Activation).unwrap();

        assert_ne!(token.plaintext(), token.digest());
        assert!(!token.digest().contains(token.plaintext()));
    }

    #[test]
    fn test_missing_digest_never_matches() {
        let issuer = create_issuer();
        let token = issuer.issue(TokenKind::Reset).unwrap();

        assert!(!issuer.matches(token.plaintext(), None));
        assert!(!issuer.matches(token.plaintext(), Some("")));
    }
}
