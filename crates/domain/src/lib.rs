//! # SheerID Domain
//!
//! Shared types for the SheerID REST client.
//!
//! This crate contains:
//! - Client and instance configuration types
//! - Request and parameter types
//! - The error enum and `Result` alias
//! - Endpoint and wire-level constants
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - No I/O

pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
