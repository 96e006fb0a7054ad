#![allow(dead_code)]

use std::path::PathBuf;

use sheerid_infra::ConfigPaths;
use tempfile::TempDir;

/// Temporary home holding both config layouts. Files are only created when
/// written, so each test starts from "nothing configured".
pub struct ConfigFixture {
    pub paths: ConfigPaths,
    _home: TempDir,
}

impl ConfigFixture {
    pub fn new() -> Self {
        let home = TempDir::new().expect("temp dir should be created");
        let paths = ConfigPaths::under_home(home.path());
        Self { paths, _home: home }
    }

    /// Write `$HOME/.sheerid.d/<name>`.
    pub fn write_instance(&self, name: &str, contents: &str) -> PathBuf {
        std::fs::create_dir_all(&self.paths.instance_dir).expect("instance dir should be created");
        let path = self.paths.instance_dir.join(name);
        std::fs::write(&path, contents).expect("instance file should be written");
        path
    }

    /// Write `$HOME/.sheerid`.
    pub fn write_aggregate(&self, contents: &str) {
        std::fs::write(&self.paths.aggregate_file, contents)
            .expect("aggregate file should be written");
    }
}

impl Default for ConfigFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Route `tracing` output to the test harness; safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
