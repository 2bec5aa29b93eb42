/**
 * Strict JSON Extraction
 *
 * Axum's stock `Json` extractor answers malformed input with its own status
 * codes and plain-text messages that describe the parse failure. Both services
 * here answer every malformed body the same way instead:
 *
 * ```http
 * HTTP/1.1 400 Bad Request
 * Content-Type: application/json
 *
 * {"error":"invalid json"}
 * ```
 *
 * # What counts as malformed
 *
 * - Body larger than `MAX_BODY_BYTES`
 * - Not valid JSON, or valid JSON followed by anything but whitespace
 * - Wrong shape for the target type (missing fields, wrong types, and unknown
 *   fields when the type uses `#[serde(deny_unknown_fields)]`)
 *
 * The content type is not checked.
 */

use axum::{
    body::to_bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::shared::error::{error_response, INVALID_JSON};

/// Upper bound on request bodies (1 MiB).
pub const MAX_BODY_BYTES: usize = 1 << 20;

/// JSON body extractor with a single generic rejection
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictJson<T>(pub T);

/// Why a body was rejected. Only ever logged; the client sees `invalid json`.
#[derive(Debug, Error)]
pub enum JsonRejection {
    /// Body could not be read or exceeded the size limit
    #[error("request body unreadable: {0}")]
    Body(#[source] axum::Error),

    /// Body did not decode into the expected type
    #[error("request body malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl IntoResponse for JsonRejection {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "rejecting request body");
        error_response(StatusCode::BAD_REQUEST, INVALID_JSON)
    }
}

impl<T, S> FromRequest<S> for StrictJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let bytes = to_bytes(req.into_body(), MAX_BODY_BYTES)
            .await
            .map_err(JsonRejection::Body)?;
        // from_slice rejects trailing non-whitespace after the first value
        let value = serde_json::from_slice(&bytes)?;
        Ok(Self(value))
    }
}
