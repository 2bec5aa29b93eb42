//! Credential Store Server Module
//!
//! Startup for the `credential-store` binary, kept in the library so the
//! integration tests can build the exact same application.
//!
//! # Architecture
//!
//! - **`config`** - `StoreConfig`, read from the environment
//! - **`state`** - `StoreState`, shared by every handler
//! - **`init`** - Database bootstrap, router assembly and serving
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── config.rs       - StoreConfig
//! ├── state.rs        - StoreState
//! └── init.rs         - create_app, build_state, serve
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration**: `StoreConfig::from_env`
//! 2. **Database**: connect, then run migrations
//! 3. **State**: `CredentialStore` over the pool, plus the query timeout
//! 4. **Routers**: one listener, or two when `INTERNAL_ADDR` is set
//! 5. **Serve** until SIGINT/SIGTERM, then close the pool

/// Store configuration
pub mod config;

/// Shared handler state
pub mod state;

/// Startup and serving
pub mod init;

// Re-export commonly used types
pub use config::StoreConfig;
pub use init::{build_state, create_app, create_internal_app, create_public_app, serve, serve_on};
pub use state::StoreState;
