/**
 * Credential Store Routes
 *
 * Two route sets. `public_routes` is what end users may reach;
 * `internal_routes` is the verify-only contract for the Login Gateway. They
 * are merged onto one listener unless `INTERNAL_ADDR` splits them (see
 * `server::init`).
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::store::handlers::{livez, readyz, register, verify_internal};
use crate::store::server::state::StoreState;

/// Registration and probes
///
/// - `POST /users`
/// - `GET /livez`
/// - `GET /healthz`
/// - `GET /readyz`
pub fn public_routes() -> Router<StoreState> {
    Router::new()
        .route("/users", post(register))
        .route("/livez", get(livez))
        .route("/healthz", get(livez))
        .route("/readyz", get(readyz))
}

/// Verification for the Login Gateway
///
/// - `POST /internal/users/{username}/verify`
pub fn internal_routes() -> Router<StoreState> {
    Router::new().route("/internal/users/{username}/verify", post(verify_internal))
}
