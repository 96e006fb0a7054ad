//! Instance name resolution
//!
//! Turns `master` or `master:puppet` into a [`ClientConfig`]:
//!
//! 1. The master name is validated before any storage is touched.
//! 2. The master record comes from the per-instance store, falling back to
//!    the aggregate store.
//! 3. A puppet segment appends `/<account_name>` to the master's token,
//!    or `/<puppet>` when the puppet's account name cannot be found.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use sheerid_domain::constants::DEFAULT_API_VERSION;
use sheerid_domain::{ClientConfig, InstanceRecord, Result, SheerIdError};
use tracing::{debug, instrument, warn};

use super::ports::ConfigStore;

/// At least one alphanumeric; only letters, digits and `@ . + - _`.
#[allow(clippy::unwrap_used)]
static INSTANCE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9@.+_-]*[A-Za-z0-9][A-Za-z0-9@.+_-]*$").unwrap());

/// Whether `name` is acceptable as the master segment of an instance name.
pub fn is_valid_instance_name(name: &str) -> bool {
    INSTANCE_NAME.is_match(name)
}

/// `master[:puppet]` split on the first colon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegationChain<'a> {
    pub master: &'a str,
    pub puppet: Option<&'a str>,
}

impl<'a> DelegationChain<'a> {
    /// Split without validating. An empty puppet segment means no delegation.
    pub fn parse(name: &'a str) -> Self {
        match name.split_once(':') {
            Some((master, puppet)) if !puppet.is_empty() => Self { master, puppet: Some(puppet) },
            Some((master, _)) => Self { master, puppet: None },
            None => Self { master: name, puppet: None },
        }
    }
}

/// Resolves instance names against a per-instance store and an aggregate
/// store.
pub struct InstanceResolver {
    instances: Arc<dyn ConfigStore>,
    aggregate: Arc<dyn ConfigStore>,
}

impl InstanceResolver {
    /// Create a resolver over the two stores
    ///
    /// # Arguments
    ///
    /// * `instances` - One record per instance, consulted first
    /// * `aggregate` - Sectioned store, used as fallback and for puppets
    pub fn new(instances: Arc<dyn ConfigStore>, aggregate: Arc<dyn ConfigStore>) -> Self {
        Self { instances, aggregate }
    }

    /// Resolve `name` into a client configuration
    ///
    /// `insecure` is OR-ed with the record's own `insecure=true` flag.
    ///
    /// # Errors
    ///
    /// - `InvalidInstanceName` if the master segment fails validation
    /// - `ConfigNotFound` if no store has the master, or it lacks a token
    /// - `MissingBaseUrl` if the master record has no `base_url`
    /// - `ConfigIo` if the aggregate store exists but cannot be read
    #[instrument(skip(self))]
    pub fn resolve(&self, name: &str, verbose: bool, insecure: bool) -> Result<ClientConfig> {
        let chain = DelegationChain::parse(name);
        if !is_valid_instance_name(chain.master) {
            return Err(SheerIdError::InvalidInstanceName { name: chain.master.to_string() });
        }

        let record = self.master_record(chain.master)?;

        let base_url = record
            .base_url()
            .ok_or_else(|| SheerIdError::MissingBaseUrl { instance: chain.master.to_string() })?
            .to_string();
        let insecure = insecure || record.insecure();
        let mut access_token = record
            .access_token()
            .ok_or_else(|| {
                SheerIdError::ConfigNotFound(format!(
                    "instance '{}' has no access_token",
                    chain.master
                ))
            })?
            .to_string();

        if let Some(puppet) = chain.puppet {
            access_token.push('/');
            access_token.push_str(&self.puppet_account(puppet));
        }

        debug!(
            instance = chain.master,
            delegated = chain.puppet.is_some(),
            %base_url,
            insecure,
            "instance resolved"
        );

        Ok(ClientConfig {
            access_token,
            base_url,
            api_version: DEFAULT_API_VERSION.to_string(),
            verbose,
            insecure,
            timeout: None,
        })
    }

    fn master_record(&self, master: &str) -> Result<InstanceRecord> {
        match self.instances.section(master) {
            Ok(Some(record)) => return Ok(record),
            Ok(None) => {}
            Err(err) => {
                warn!(
                    instance = master,
                    store = %self.instances.describe(),
                    error = %err,
                    "per-instance config unreadable, trying aggregate store"
                );
            }
        }

        self.aggregate.section(master)?.ok_or_else(|| {
            SheerIdError::ConfigNotFound(format!("no configuration for instance '{master}'"))
        })
    }

    /// Account name to act as; never fails.
    fn puppet_account(&self, puppet: &str) -> String {
        match self.aggregate.section(puppet) {
            Ok(Some(record)) => {
                if let Some(account_name) = record.account_name() {
                    return account_name.to_string();
                }
                debug!(puppet, "puppet record has no account_name, using raw name");
            }
            Ok(None) => debug!(puppet, "no puppet record, using raw name"),
            Err(err) => warn!(puppet, error = %err, "puppet lookup failed, using raw name"),
        }
        puppet.to_string()
    }
}
