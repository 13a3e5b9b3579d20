//! Password hashing using argon2
//!
//! Provides secure password hashing and verification.
//!
//! # Performance Considerations
//!
//! Argon2 is intentionally CPU-intensive. Request handlers must go through
//! [`PasswordService::hash_async`] / [`PasswordService::verify_async`], which
//! run the work on tokio's blocking pool.

use crate::config::PasswordConfig;
use argon2::{
    password_hash::{
        self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

/// Password hashing failures
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("Failed to hash password: {0}")]
    Hashing(String),

    /// The stored hash could not be parsed. Never treated as a match.
    #[error("Malformed password hash: {0}")]
    MalformedHash(String),

    #[error("Task join error: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Password hashing service
///
/// Uses Argon2id with cost parameters from configuration. Every hash embeds
/// a fresh random salt, so hashing the same password twice yields different
/// strings that both verify.
#[derive(Clone)]
pub struct PasswordService {
    argon2: Argon2<'static>,
}

impl PasswordService {
    /// Build the hasher from configured cost parameters
    pub fn new(config: &PasswordConfig) -> Result<Self, PasswordError> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a password (blocking operation)
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Hash a password on the blocking thread pool
    pub async fn hash_async(&self, password: String) -> Result<String, PasswordError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.hash(&password)).await?
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// Returns `Ok(false)` on mismatch and `Err(MalformedHash)` when the
    /// stored hash cannot be parsed. Bcrypt hashes written by the previous
    /// backend are still accepted.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        if is_bcrypt_hash(hash) {
            return bcrypt::verify(password, hash)
                .map_err(|e| PasswordError::MalformedHash(e.to_string()));
        }

        let parsed =
            PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        // Argon2 verification takes its parameters from the parsed hash, so
        // hashes made under older cost settings still verify.
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::MalformedHash(e.to_string())),
        }
    }

    /// Verify a password on the blocking thread pool
    pub async fn verify_async(
        &self,
        password: String,
        hash: String,
    ) -> Result<bool, PasswordError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.verify(&password, &hash)).await?
    }
}

fn is_bcrypt_hash(hash: &str) -> bool {
    ["$2a$", "$2b$", "$2x$", "$2y$"]
        .iter()
        .any(|prefix| hash.starts_with(prefix))
}
