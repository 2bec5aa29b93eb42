//! Login Gateway Server Module
//!
//! # Architecture
//!
//! - **`config`** - `GatewayConfig`, read from the environment
//! - **`state`** - `GatewayState`, shared by every handler
//! - **`init`** - State construction, router assembly and serving
//!
//! The gateway holds no database and no per-user state. Its only dependency
//! is the Credential Store's internal verify endpoint.

/// Gateway configuration
pub mod config;

/// Shared handler state
pub mod state;

/// Startup and serving
pub mod init;

// Re-export commonly used types
pub use config::GatewayConfig;
pub use init::{build_state, create_app, serve, serve_on};
pub use state::GatewayState;
