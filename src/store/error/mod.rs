//! Credential Store Error Module
//!
//! # Architecture
//!
//! - **`types`** - `StoreError`, the failure half of every store operation
//! - **`conversion`** - `StoreError` -> `Outcome`, where server errors are
//!   logged and stripped of detail
//!
//! # Error Types
//!
//! - `InvalidIdentifier` - Username fails the syntax rule
//! - `InvalidSecret` - Registration password fails the length rule
//! - `InvalidCredentials` - Wrong password or unknown user (never told apart)
//! - `AlreadyExists` - Username taken
//! - `NotFound` - Only produced by the in-process hash lookup
//! - `Server` - Anything unexpected from a dependency

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{BoxError, StoreError};
