//! Port interface for instance configuration storage

use sheerid_domain::{InstanceRecord, Result};

/// Lookup of named configuration sections.
///
/// Implementations re-read their backing storage on every call.
pub trait ConfigStore: Send + Sync {
    /// Find the section called `name`.
    ///
    /// Returns `Ok(None)` when the section (or the whole backing file) does
    /// not exist, and an error only when existing storage cannot be read.
    fn section(&self, name: &str) -> Result<Option<InstanceRecord>>;

    /// Short human-readable description used in log fields.
    fn describe(&self) -> String;
}
