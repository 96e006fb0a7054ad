//! # SheerID Core
//!
//! Pure client logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - Parameter normalization and form encoding
//! - Instance configuration parsing and name resolution
//! - The `SheerId` client façade, resource operations and bulk uploader
//! - Port interfaces (`ConfigStore`, `Transport`)
//!
//! ## Architecture Principles
//! - Only depends on `sheerid-domain`
//! - No filesystem or network code
//! - All external dependencies via traits

pub mod client;
pub mod instance;
pub mod params;

pub use client::{BulkUploader, SheerId, Transport};
pub use instance::{ConfigStore, InstanceResolver};
