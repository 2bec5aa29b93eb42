//! Login Gateway Module
//!
//! Exchanges a username and password for a short-lived HS256 token. The
//! gateway never sees a password hash: it asks the Credential Store for a
//! verdict over the internal verify endpoint and signs a token only on a
//! positive answer.
//!
//! # Architecture
//!
//! - **`client`** - `UserServiceClient` for the Credential Store
//! - **`token`** - `TokenIssuer` and `Claims`
//! - **`login`** - `LoginService` and the `LoginPhase` state machine
//! - **`error`** - `LoginError` and its HTTP rendering
//! - **`handlers`** - `POST /login`, `GET /healthz`
//! - **`routes`** - Route set
//! - **`server`** - Configuration, state and startup
//!
//! # Module Structure
//!
//! ```text
//! gateway/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - `login-gateway` binary
//! ├── client.rs       - Credential Store client
//! ├── token.rs        - JWT issuance
//! ├── login.rs        - Login flow
//! ├── error.rs        - LoginError
//! ├── handlers.rs     - HTTP handlers
//! ├── routes.rs       - Route set
//! └── server/         - Config, state, startup
//! ```
//!
//! # Failure Semantics
//!
//! Wrong password, unknown user and malformed username all produce the same
//! `401 {"error":"invalid credentials"}`. A Credential Store that is down,
//! slow or off-contract produces `500 {"error":"server error"}`. Nothing is
//! retried.

/// Credential Store client
pub mod client;

/// Token issuance
pub mod token;

/// Login flow
pub mod login;

/// Login errors
pub mod error;

/// HTTP handlers
pub mod handlers;

/// Route configuration
pub mod routes;

/// Server setup and configuration
pub mod server;

// Re-export commonly used types
pub use client::{UpstreamError, UserServiceClient};
pub use error::LoginError;
pub use login::{LoginPhase, LoginService};
pub use server::{create_app, GatewayConfig, GatewayState};
pub use token::{Claims, TokenError, TokenIssuer};
