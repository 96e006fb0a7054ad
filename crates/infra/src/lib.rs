//! # SheerID Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The blocking HTTP executor (`reqwest`)
//! - File-backed instance configuration stores
//! - Environment-driven config discovery and the `load_instance` entry point
//!
//! ## Architecture
//! - Implements traits defined in `sheerid-core`
//! - Contains all "impure" code (filesystem, network)

use std::sync::Arc;
use std::time::Duration;

use sheerid_core::{InstanceResolver, SheerId};
use sheerid_domain::{ClientConfig, Result};
use tracing::info;

pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use config::{AggregateFileStore, ConfigPaths, InstanceDirStore};
pub use errors::InfraError;
pub use http::{HttpExecutor, HttpExecutorBuilder};

/// Build a client for `config` backed by [`HttpExecutor`].
///
/// # Errors
/// Returns `SheerIdError::Transport` if the HTTP client cannot be built.
pub fn client_from_config(config: ClientConfig) -> Result<SheerId> {
    let executor = HttpExecutor::from_config(&config)?;
    Ok(SheerId::new(config, Arc::new(executor)))
}

/// Resolver over the two file layouts at `paths`.
pub fn resolver(paths: &ConfigPaths) -> InstanceResolver {
    InstanceResolver::new(
        Arc::new(InstanceDirStore::new(&paths.instance_dir)),
        Arc::new(AggregateFileStore::new(&paths.aggregate_file)),
    )
}

/// Load a named instance (`master` or `master:puppet`) using the default
/// config locations.
///
/// # Errors
/// Config discovery, resolution and client construction errors.
pub fn load_instance(name: &str, verbose: bool, insecure: bool) -> Result<SheerId> {
    load_instance_from(&ConfigPaths::from_env()?, name, verbose, insecure)
}

/// Like [`load_instance`] with explicit config locations.
///
/// # Errors
/// Resolution and client construction errors.
pub fn load_instance_from(
    paths: &ConfigPaths,
    name: &str,
    verbose: bool,
    insecure: bool,
) -> Result<SheerId> {
    load_instance_from_with_timeout(paths, name, verbose, insecure, None)
}

/// Like [`load_instance_from`] with a per-request timeout applied to the
/// resolved client. `None` blocks until the transport resolves.
///
/// # Errors
/// Resolution and client construction errors.
pub fn load_instance_from_with_timeout(
    paths: &ConfigPaths,
    name: &str,
    verbose: bool,
    insecure: bool,
    timeout: Option<Duration>,
) -> Result<SheerId> {
    let mut config = resolver(paths).resolve(name, verbose, insecure)?;
    config.timeout = timeout;
    info!(instance = name, base_url = %config.base_url, ?timeout, "instance loaded");
    client_from_config(config)
}
