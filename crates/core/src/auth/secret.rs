//! Secret hashing with Argon2id.
//!
//! Uses the recommended Argon2id variant. Cost parameters come from
//! [`CredentialConfig`]; the defaults match the Argon2 crate defaults.

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, Version,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use nestegg_shared::config::CredentialConfig;
use thiserror::Error;

/// Errors that can occur during credential operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// The hashing primitive failed (bad parameters, resource exhaustion).
    #[error("failed to hash secret: {0}")]
    Hashing(String),

    /// The candidate secret does not match.
    ///
    /// Deliberately carries no detail: callers cannot tell a wrong secret
    /// from an unknown account or a corrupt digest.
    #[error("credentials do not match")]
    Mismatch,
}

/// Argon2id hasher configured with explicit cost parameters.
#[derive(Debug, Clone)]
pub struct SecretHasher {
    params: Params,
}

impl SecretHasher {
    /// Creates a hasher from configuration.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Hashing` if the cost parameters are rejected.
    pub fn from_config(config: &CredentialConfig) -> Result<Self, CredentialError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| CredentialError::Hashing(e.to_string()))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a secret into a salted PHC string.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Hashing` if hashing fails.
    pub fn hash(&self, secret: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CredentialError::Hashing(e.to_string()))
    }

    /// Verifies a candidate secret against a stored digest.
    ///
    /// The digest carries its own parameters, so digests produced with other
    /// cost settings still verify.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Mismatch` for a wrong secret or an unreadable digest.
    pub fn verify(&self, digest: &str, candidate: &str) -> Result<(), CredentialError> {
        let parsed = PasswordHash::new(digest).map_err(|_| CredentialError::Mismatch)?;

        self.argon2()
            .verify_password(candidate.as_bytes(), &parsed)
            .map_err(|_| CredentialError::Mismatch)
    }

    /// Spends the same Argon2 work as [`verify`](Self::verify) on `candidate`
    /// and returns `Mismatch`.
    ///
    /// Used when there is no stored digest to check against, so an unknown
    /// account costs as much to reject as a wrong secret.
    #[must_use]
    pub fn reject(&self, candidate: &str) -> CredentialError {
        let _ = self.hash(candidate);
        CredentialError::Mismatch
    }
}

impl Default for SecretHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

/// Hashes a secret using Argon2id with default parameters.
///
/// # Errors
///
/// Returns `CredentialError::Hashing` if hashing fails.
///
/// # Example
///
/// ```
/// use nestegg_core::auth::hash_secret;
///
/// let hash = hash_secret("my_secure_secret").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_secret(secret: &str) -> Result<String, CredentialError> {
    SecretHasher::default().hash(secret)
}

/// Verifies a secret against a digest produced by [`hash_secret`].
///
/// # Errors
///
/// Returns `CredentialError::Mismatch` if the secret does not match.
///
/// # Example
///
/// ```
/// use nestegg_core::auth::{CredentialError, hash_secret, verify_secret};
///
/// let hash = hash_secret("my_secret").unwrap();
/// assert!(verify_secret(&hash, "my_secret").is_ok());
/// assert_eq!(verify_secret(&hash, "wrong"), Err(CredentialError::Mismatch));
/// ```
pub fn verify_secret(digest: &str, candidate: &str) -> Result<(), CredentialError> {
    SecretHasher::default().verify(digest, candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> SecretHasher {
        SecretHasher::from_config(&CredentialConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_hash_secret() {
        let secret = "test_secret_123!";
        let hash = hash_secret(secret).unwrap();

        // Hash should be in PHC format
        assert!(hash.starts_with("$argon2id$"));

        // Hash should be different from secret
        assert_ne!(hash, secret);
    }

    #[test]
    fn test_verify_correct_secret() {
        let hasher = fast_hasher();
        let hash = hasher.hash("correct_secret").unwrap();

        assert!(hasher.verify(&hash, "correct_secret").is_ok());
    }

    #[test]
    fn test_verify_wrong_secret() {
        let hasher = fast_hasher();
        let hash = hasher.hash("correct_secret").unwrap();

        assert_eq!(
            hasher.verify(&hash, "wrong_secret"),
            Err(CredentialError::Mismatch)
        );
    }

    #[test]
    fn test_same_secret_different_hashes() {
        let hasher = fast_hasher();
        let hash1 = hasher.hash("secret1").unwrap();
        let hash2 = hasher.hash("secret1").unwrap();

        // Same secret should produce different hashes (due to random salt)
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_invalid_digest_is_a_mismatch() {
        let result = fast_hasher().verify("invalid_hash", "secret");
        assert_eq!(result, Err(CredentialError::Mismatch));
    }

    #[test]
    fn test_digest_from_other_params_still_verifies() {
        let hash = fast_hasher().hash("portable").unwrap();
        assert!(verify_secret(&hash, "portable").is_ok());
    }

    #[test]
    fn test_reject_without_digest_is_a_mismatch() {
        let hasher = fast_hasher();
        assert_eq!(hasher.reject("any_secret"), CredentialError::Mismatch);
        assert_eq!(hasher.reject(""), CredentialError::Mismatch);
    }

    #[test]
    fn test_rejects_bad_cost_parameters() {
        let result = SecretHasher::from_config(&CredentialConfig {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        });
        assert!(matches!(result, Err(CredentialError::Hashing(_))));
    }
}
