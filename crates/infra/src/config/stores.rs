//! File-backed config stores
//!
//! Both stores re-read their file on every lookup. A missing file or
//! directory means "no such section"; any other read failure is reported as
//! `ConfigIo` so the resolver can decide whether to fall back.

use std::path::{Path, PathBuf};

use sheerid_core::instance::{parse_properties, parse_sections};
use sheerid_core::ConfigStore;
use sheerid_domain::{InstanceRecord, Result};
use tracing::trace;

use crate::errors::conversions::read_optional;

/// One flat `key=value` file per instance, named after the instance.
#[derive(Debug, Clone)]
pub struct InstanceDirStore {
    dir: PathBuf,
}

impl InstanceDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ConfigStore for InstanceDirStore {
    fn section(&self, name: &str) -> Result<Option<InstanceRecord>> {
        let path = self.dir.join(name);
        trace!(path = %path.display(), "reading instance file");
        Ok(read_optional(&path)?
            .map(|contents| InstanceRecord::new(name, parse_properties(&contents))))
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

/// Single file of `[name]` sections.
#[derive(Debug, Clone)]
pub struct AggregateFileStore {
    path: PathBuf,
}

impl AggregateFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for AggregateFileStore {
    fn section(&self, name: &str) -> Result<Option<InstanceRecord>> {
        trace!(path = %self.path.display(), section = name, "reading aggregate file");
        let Some(contents) = read_optional(&self.path)? else {
            return Ok(None);
        };
        Ok(parse_sections(&contents)
            .remove(name)
            .map(|fields| InstanceRecord::new(name, fields)))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use sheerid_domain::SheerIdError;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn instance_file_is_parsed() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("prod"),
            "# production\naccess_token = abc=\nbase_url=https://services.sheerid.com\n",
        )
        .unwrap();

        let store = InstanceDirStore::new(dir.path());
        let record = store.section("prod").unwrap().unwrap();

        assert_eq!(record.name, "prod");
        assert_eq!(record.access_token(), Some("abc="));
        assert_eq!(record.base_url(), Some("https://services.sheerid.com"));
    }

    #[test]
    fn missing_instance_file_or_dir_is_absent() {
        let dir = TempDir::new().unwrap();
        assert_eq!(InstanceDirStore::new(dir.path()).section("prod").unwrap(), None);
        assert_eq!(InstanceDirStore::new(dir.path().join("missing")).section("prod").unwrap(), None);
    }

    #[test]
    fn aggregate_sections_are_looked_up_by_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".sheerid");
        std::fs::write(
            &path,
            "stray=1\n[prod]\naccess_token=abc\n[ puppet ]\naccount_name=Puppet Co\n",
        )
        .unwrap();

        let store = AggregateFileStore::new(&path);
        assert_eq!(store.section("puppet").unwrap().unwrap().account_name(), Some("Puppet Co"));
        assert_eq!(store.section("prod").unwrap().unwrap().field("stray"), None);
        assert_eq!(store.section("other").unwrap(), None);
    }

    #[test]
    fn missing_aggregate_file_is_absent() {
        let dir = TempDir::new().unwrap();
        let store = AggregateFileStore::new(dir.path().join(".sheerid"));
        assert_eq!(store.section("prod").unwrap(), None);
    }

    #[test]
    fn unreadable_aggregate_file_is_config_io() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be read as a file.
        let store = AggregateFileStore::new(dir.path());
        assert!(matches!(store.section("prod"), Err(SheerIdError::ConfigIo { .. })));
    }

    #[test]
    fn files_are_reread_on_every_lookup() {
        let dir = TempDir::new().unwrap();
        let store = InstanceDirStore::new(dir.path());
        assert_eq!(store.section("prod").unwrap(), None);

        std::fs::write(dir.path().join("prod"), "access_token=late\n").unwrap();
        assert_eq!(store.section("prod").unwrap().unwrap().access_token(), Some("late"));
    }
}
