//! Common test utilities and helpers
//!
//! - In-memory Credential Store state (SQLite, bcrypt cost 4)
//! - Store and gateway `TestServer`s, and a store bound to a real port for
//!   the gateway to call over HTTP
//! - Response assertions

#![allow(dead_code)]

pub mod assertions;
pub mod servers;

// Re-export commonly used utilities
pub use assertions::*;
pub use servers::*;
