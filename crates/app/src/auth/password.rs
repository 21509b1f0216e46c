//! Password secrets and hashing.

use std::fmt;

use argon2::{
    Argon2, PasswordHash as EncodedHash,
    password_hash::{
        self, PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core::OsRng,
    },
};
use mockall::automock;
use serde::Deserialize;
use thiserror::Error;
use zeroize::Zeroize;

use crate::domain::accounts::records::PasswordHash;

/// Plaintext password as received from a user. Wiped from memory on drop.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

impl Drop for Password {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password")]
    Hash(#[source] password_hash::Error),

    #[error("stored password hash is malformed")]
    MalformedHash(#[source] password_hash::Error),
}

/// One-way password hashing.
#[automock]
pub trait PasswordHasher: Send + Sync {
    /// Hash a password with a fresh salt.
    ///
    /// # Errors
    ///
    /// Returns an error when hashing fails.
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordError>;

    /// Check a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error when the stored hash cannot be parsed.
    fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, PasswordError>;
}

/// Argon2id with the crate's default parameters.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.expose().as_bytes(), &salt)
            .map(|hash| PasswordHash::new(hash.to_string()))
            .map_err(PasswordError::Hash)
    }

    fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, PasswordError> {
        let parsed = EncodedHash::new(hash.as_str()).map_err(PasswordError::MalformedHash)?;

        match self
            .argon2
            .verify_password(password.expose().as_bytes(), &parsed)
        {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(error) => Err(PasswordError::MalformedHash(error)),
        }
    }
}
