/**
 * Error Conversion
 *
 * Turns a `StoreError` into the `Outcome` that goes on the wire. This is the
 * last place a server error's source chain is visible: it is logged here and
 * dropped, and the client only ever receives `{"error":"server error"}`.
 */

use crate::store::error::types::StoreError;
use crate::store::outcome::Outcome;

impl From<StoreError> for Outcome {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidIdentifier => Self::InvalidIdentifier,
            StoreError::InvalidSecret => Self::InvalidSecret,
            StoreError::InvalidCredentials => Self::InvalidCredentials,
            StoreError::AlreadyExists => Self::AlreadyExists,
            StoreError::NotFound => Self::NotFound,
            StoreError::Server(source) => {
                tracing::error!(error = %source, "Credential store operation failed");
                Self::ServerError
            }
        }
    }
}

impl Outcome {
    /// Collapse an operation result into its outcome
    pub fn from_result<T>(result: Result<T, StoreError>) -> Self
    where
        T: Into<Outcome>,
    {
        match result {
            Ok(success) => success.into(),
            Err(err) => err.into(),
        }
    }
}
