//! Credential hashing using Argon2

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use std::fmt::Debug;

use crate::config::HashProfile;
use crate::domain::AuthError;

/// Trait for credential hashing operations
pub trait CredentialHasher: Send + Sync + Debug {
    /// Hash a password into a salted, self-describing digest string
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored digest
    ///
    /// Never errors: an empty or unparsable digest verifies false.
    fn verify(&self, password: &str, digest: &str) -> bool;
}

/// Argon2-based credential hasher
///
/// The cost profile is chosen explicitly at construction. Digests embed
/// their own parameters, so a digest produced under one profile verifies
/// under a hasher built with another.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher {
    profile: HashProfile,
}

impl Argon2Hasher {
    /// Create a hasher with the given cost profile
    pub fn new(profile: HashProfile) -> Self {
        Self { profile }
    }

    /// Create a hasher with the production cost profile
    pub fn production() -> Self {
        Self::new(HashProfile::Production)
    }

    /// Create a hasher with the minimum-cost test profile
    pub fn test() -> Self {
        Self::new(HashProfile::Test)
    }

    pub fn profile(&self) -> HashProfile {
        self.profile
    }

    fn context(&self) -> Argon2<'static> {
        match self.profile {
            HashProfile::Production => Argon2::default(),
            HashProfile::Test => {
                // Cheapest cost the algorithm accepts: 8 KiB of memory over a single pass
                let params = Params::new(8, 1, 1, None).expect("minimum Argon2 params");
                Argon2::new(Algorithm::default(), Version::default(), params)
            }
        }
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.context()
            .hash_password(password.as_bytes(), &salt)
            .map(|digest| digest.to_string())
            .map_err(|e| AuthError::internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, digest: &str) -> bool {
        let parsed = match PasswordHash::new(digest) {
            Ok(d) => d,
            Err(_) => return false,
        };

        self.context()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2Hasher::test();
        let password = "secret1";

        let digest = hasher.hash(password).unwrap();

        assert!(hasher.verify(password, &digest));
        assert!(!hasher.verify("wrong_password", &digest));
    }

    #[test]
    fn test_digest_is_salted() {
        let hasher = Argon2Hasher::test();
        let password = "secret1";

        let digest1 = hasher.hash(password).unwrap();
        let digest2 = hasher.hash(password).unwrap();

        // Digests differ due to random salt
        assert_ne!(digest1, digest2);

        // But both verify correctly
        assert!(hasher.verify(password, &digest1));
        assert!(hasher.verify(password, &digest2));
    }

    #[test]
    fn test_digest_does_not_contain_password() {
        let hasher = Argon2Hasher::test();
        let password = "secret1";

        let digest = hasher.hash(password).unwrap();

        assert!(digest.starts_with("$argon2"));
        assert!(!digest.contains(password));
    }

    #[test]
    fn test_verify_invalid_digest() {
        let hasher = Argon2Hasher::test();

        assert!(!hasher.verify("password", "invalid_digest_format"));
        assert!(!hasher.verify("password", ""));
    }

    #[test]
    fn test_profiles_cross_verify() {
        let test_hasher = Argon2Hasher::test();
        let production_hasher = Argon2Hasher::production();
        let password = "secret1";

        // Parameters travel inside the digest, so verification works
        // regardless of which profile the verifying hasher carries
        let test_digest = test_hasher.hash(password).unwrap();
        assert!(production_hasher.verify(password, &test_digest));

        let production_digest = production_hasher.hash(password).unwrap();
        assert!(test_hasher.verify(password, &production_digest));
    }

    #[test]
    fn test_default_profile_is_production() {
        let hasher = Argon2Hasher::default();
        assert_eq!(hasher.profile(), HashProfile::Production);
    }
}
