//! Config file discovery
//!
//! ## Loading Strategy
//! 1. `SHEERID_INSTANCE_DIR` / `SHEERID_CONFIG_FILE` when set and non-empty
//! 2. Otherwise `$HOME/.sheerid.d` and `$HOME/.sheerid`
//!
//! Each location is resolved independently, so one override can be combined
//! with the HOME default for the other.

use std::path::{Path, PathBuf};

use sheerid_domain::constants::{
    AGGREGATE_FILE_NAME, ENV_CONFIG_FILE, ENV_INSTANCE_DIR, INSTANCE_DIR_NAME,
};
use sheerid_domain::{Result, SheerIdError};

/// Locations of the two config layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    /// Directory holding one file per instance.
    pub instance_dir: PathBuf,
    /// Sectioned file holding every instance.
    pub aggregate_file: PathBuf,
}

impl ConfigPaths {
    pub fn new(instance_dir: impl Into<PathBuf>, aggregate_file: impl Into<PathBuf>) -> Self {
        Self { instance_dir: instance_dir.into(), aggregate_file: aggregate_file.into() }
    }

    /// Default layout under a home directory.
    pub fn under_home(home: &Path) -> Self {
        Self::new(home.join(INSTANCE_DIR_NAME), home.join(AGGREGATE_FILE_NAME))
    }

    /// Discover paths from the environment
    ///
    /// # Errors
    /// Returns `SheerIdError::Config` if a location has no override and
    /// `HOME` is not set.
    pub fn from_env() -> Result<Self> {
        let instance_dir = match env_path(ENV_INSTANCE_DIR) {
            Some(dir) => dir,
            None => home_dir()?.join(INSTANCE_DIR_NAME),
        };
        let aggregate_file = match env_path(ENV_CONFIG_FILE) {
            Some(file) => file,
            None => home_dir()?.join(AGGREGATE_FILE_NAME),
        };

        tracing::debug!(
            instance_dir = %instance_dir.display(),
            aggregate_file = %aggregate_file.display(),
            "config paths resolved"
        );
        Ok(Self { instance_dir, aggregate_file })
    }
}

/// Non-empty path from an environment variable.
fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key).filter(|value| !value.is_empty()).map(PathBuf::from)
}

fn home_dir() -> Result<PathBuf> {
    env_path("HOME").ok_or_else(|| {
        SheerIdError::Config(format!(
            "HOME is not set; set {ENV_INSTANCE_DIR} and {ENV_CONFIG_FILE} instead"
        ))
    })
}
