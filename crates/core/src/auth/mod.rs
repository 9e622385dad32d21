//! Account secret hashing and verification.
//!
//! This module provides:
//! - Secret hashing with Argon2id
//! - Constant-time secret verification

mod secret;

pub use secret::{CredentialError, SecretHasher, hash_secret, verify_secret};
