//! Shared Module
//!
//! Plumbing used by both the Credential Store and the Login Gateway. Nothing
//! in here knows about users, passwords or tokens; it only covers how the two
//! services speak HTTP, read their configuration and bound their calls.
//!
//! # Overview
//!
//! - **`error`** - JSON error body shared by every non-2xx response
//! - **`json`** - `StrictJson` extractor (unknown fields, trailing data and
//!   oversized bodies are all rejected with one generic 400)
//! - **`deadline`** - Caller-supplied deadline for dependency calls
//! - **`config`** - Environment variable helpers and `ConfigError`
//! - **`http`** - Standard middleware stack and graceful shutdown signal
//! - **`telemetry`** - `tracing` subscriber initialisation

/// Shared error body
pub mod error;

/// Strict JSON request extraction
pub mod json;

/// Deadlines for dependency calls
pub mod deadline;

/// Configuration helpers
pub mod config;

/// Middleware and shutdown
pub mod http;

/// Tracing initialisation
pub mod telemetry;

/// Re-export commonly used types for convenience
pub use config::ConfigError;
pub use deadline::{Deadline, DeadlineExceeded};
pub use error::{BoxError, ErrorBody};
pub use json::{JsonRejection, StrictJson};
