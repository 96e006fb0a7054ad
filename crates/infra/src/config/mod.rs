//! Instance configuration on disk
//!
//! File-backed [`ConfigStore`](sheerid_core::ConfigStore) implementations and
//! environment-driven discovery of where those files live.

pub mod paths;
pub mod stores;

pub use paths::ConfigPaths;
pub use stores::{AggregateFileStore, InstanceDirStore};
