//! Credential Store Module
//!
//! The Credential Store owns user identity and password hashes. It is the only
//! component that ever sees a hash; everything it returns to a caller is a
//! verdict.
//!
//! # Architecture
//!
//! - **`validation`** - Username and password rules
//! - **`password`** - bcrypt hashing and verification on the blocking pool
//! - **`db`** - PostgreSQL / SQLite persistence through sqlx
//! - **`credentials`** - `CredentialStore`: register, verify, hash lookup
//! - **`error`** - `StoreError` and its conversion into an `Outcome`
//! - **`outcome`** - The tagged result and its total HTTP mapping
//! - **`handlers`** - Axum handlers for the public and internal endpoints
//! - **`routes`** - Public and internal route sets
//! - **`server`** - Configuration, shared state and startup
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - `credential-store` binary
//! ├── validation.rs   - Input rules
//! ├── password.rs     - bcrypt on spawn_blocking
//! ├── db.rs           - Database handle and queries
//! ├── credentials.rs  - Domain operations
//! ├── outcome.rs      - Outcome -> HTTP mapping
//! ├── error/          - StoreError
//! ├── handlers.rs     - HTTP handlers
//! ├── routes.rs       - Route sets
//! └── server/         - Config, state, startup
//! ```
//!
//! # Endpoints
//!
//! Public:
//! - `POST /users` - Registration
//! - `GET /livez`, `GET /healthz` - Liveness
//! - `GET /readyz` - Readiness (database reachable within 2s)
//!
//! Internal (Login Gateway only):
//! - `POST /internal/users/{username}/verify` - Credential verification
//!
//! # Enumeration Safety
//!
//! `verify` answers an unknown username exactly like a wrong password: same
//! `StoreError::InvalidCredentials`, same 401 body, and a decoy bcrypt
//! comparison so the two paths cost about the same.

/// Username and password rules
pub mod validation;

/// Password hashing
pub mod password;

/// Persistence
pub mod db;

/// Credential operations
pub mod credentials;

/// Store error types
pub mod error;

/// Tagged outcome and HTTP mapping
pub mod outcome;

/// HTTP handlers
pub mod handlers;

/// Route configuration
pub mod routes;

/// Server setup and configuration
pub mod server;

// Re-export commonly used types
pub use credentials::CredentialStore;
pub use db::Database;
pub use error::StoreError;
pub use outcome::{Created, Outcome, Verified};
pub use password::PasswordHasher;
pub use server::{create_app, StoreConfig, StoreState};
