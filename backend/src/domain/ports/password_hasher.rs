//! Password hashing capability.
//!
//! Passwords are stored only as salted one-way hashes. The production
//! implementation uses argon2id; tests can swap in a cheap stand-in.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};

use super::define_port_error;

define_port_error! {
    /// Errors raised while hashing a password.
    pub enum PasswordHashError {
        /// The hashing primitive failed.
        Hashing { message: String } =>
            "password hashing failed: {message}",
    }
}

/// One-way password hashing and verification.
pub trait PasswordHasher: Send + Sync {
    /// Hash a raw password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Whether `password` matches the stored `hash`.
    ///
    /// An unparseable stored hash verifies as false rather than erroring;
    /// the caller treats it as bad credentials.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// argon2id-backed hasher used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| PasswordHashError::hashing(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}
