//! Credgate - Main Library
//!
//! Credgate authenticates end users for a larger platform. It is split into two
//! cooperating HTTP services that only talk to each other over a private,
//! network-internal API:
//!
//! - **Credential Store** owns the user table. It validates and hashes
//!   passwords on registration and verifies presented passwords against the
//!   stored hash. The hash never leaves this service.
//! - **Login Gateway** accepts end-user logins, delegates verification to the
//!   Credential Store and, on success, issues a short-lived HS256 token.
//!
//! # Module Structure
//!
//! - **`shared`** - Plumbing used by both services
//!   - Strict JSON extraction and error bodies
//!   - Deadlines for dependency calls
//!   - Environment configuration helpers
//!   - Tracing setup, standard middleware and shutdown signal
//!
//! - **`store`** - The Credential Store (`credential-store` binary)
//!   - Username and password rules
//!   - bcrypt hashing on the blocking pool
//!   - PostgreSQL / SQLite persistence via sqlx
//!   - Registration and verification, with a total outcome-to-status mapping
//!
//! - **`gateway`** - The Login Gateway (`login-gateway` binary)
//!   - HTTP client for the internal verify endpoint
//!   - Token issuance
//!   - The login flow and its phases
//!
//! # Request Flow
//!
//! ```text
//! end user --POST /login--> gateway --POST /internal/users/{u}/verify--> store
//!          <---- token ----         <------------ 204 / 401 ------------
//!
//! end user --POST /users--> store
//! ```
//!
//! # Enumeration Safety
//!
//! An unknown username and a wrong password produce the same status, the same
//! body and (as far as bcrypt allows) the same amount of work, both on the
//! internal verify endpoint and on the public login endpoint.

/// Plumbing shared by both services
pub mod shared;

/// Credential Store service
pub mod store;

/// Login Gateway service
pub mod gateway;
