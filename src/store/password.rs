/**
 * Password Hashing
 *
 * bcrypt, at a fixed cost chosen by the operator of this crate and never by
 * the caller. Both hashing and verification are deliberately slow, so they run
 * on tokio's blocking pool and never on an async worker thread. No lock is
 * held while they run.
 *
 * `bcrypt::verify` performs the constant-time comparison.
 *
 * # Long Passwords
 *
 * bcrypt reads at most 72 bytes of input, while a registrable password may
 * run to 128 characters (up to 512 bytes of UTF-8). Every password is
 * therefore reduced to the base64 form of its SHA-256 digest before it
 * reaches bcrypt: 44 ASCII bytes, no NUL, and every input byte counts.
 */

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Work factor for new hashes.
pub const HASH_COST: u32 = bcrypt::DEFAULT_COST;

/// Errors from the hashing layer. Always surfaced as a server error.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// bcrypt hasher with a fixed cost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: HASH_COST }
    }
}

impl PasswordHasher {
    /// Hasher at `HASH_COST`
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher at an explicit cost.
    ///
    /// Only meant for tests and benchmarks, where `bcrypt::DEFAULT_COST` makes
    /// every case take a quarter of a second.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a password with a fresh random salt
    pub async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let input = prehash(password);
        let cost = self.cost;
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(input, cost)).await??;
        Ok(hash)
    }

    /// Compare a password against a stored hash
    ///
    /// # Returns
    ///
    /// `Ok(true)` on match, `Ok(false)` on mismatch, `Err` if the stored hash
    /// is not a bcrypt hash or the task failed.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let input = prehash(password);
        let hash = hash.to_owned();
        let matched = tokio::task::spawn_blocking(move || bcrypt::verify(input, &hash)).await??;
        Ok(matched)
    }
}

/// Fixed-length bcrypt input covering the whole password
fn prehash(password: &str) -> String {
    STANDARD.encode(Sha256::digest(password.as_bytes()))
}
