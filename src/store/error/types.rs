/**
 * Credential Store Error Types
 *
 * Validation errors carry the precise reason because the caller can fix them.
 * Database errors are inspected only far enough to recognise a unique
 * violation (`AlreadyExists`); every other dependency failure is wrapped in
 * `Server` and never shown to a client.
 *
 * The `Display` strings double as the public messages for the client-facing
 * variants, so they must stay fixed and free of user input.
 */

use thiserror::Error;

use crate::shared::DeadlineExceeded;
use crate::store::password::PasswordError;

pub use crate::shared::error::BoxError;

/// Failure of a credential store operation
#[derive(Debug, Error)]
pub enum StoreError {
    /// Username fails the charset/length rule
    #[error("invalid username")]
    InvalidIdentifier,

    /// Registration password fails the length rule
    #[error("invalid password")]
    InvalidSecret,

    /// Wrong password, unknown user, or an implausible presented password
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Username already registered
    #[error("user already exists")]
    AlreadyExists,

    /// No record for the username (hash lookup only)
    #[error("user not found")]
    NotFound,

    /// Unexpected dependency failure
    #[error("server error")]
    Server(#[source] BoxError),
}

impl StoreError {
    /// Wrap any dependency error as a server error
    pub fn server(err: impl Into<BoxError>) -> Self {
        Self::Server(err.into())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::server(err)
    }
}

impl From<PasswordError> for StoreError {
    fn from(err: PasswordError) -> Self {
        Self::server(err)
    }
}

impl From<DeadlineExceeded> for StoreError {
    fn from(err: DeadlineExceeded) -> Self {
        Self::server(err)
    }
}
