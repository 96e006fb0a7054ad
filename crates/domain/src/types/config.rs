//! Client and instance configuration types

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_VERSION, FIELD_ACCESS_TOKEN, FIELD_ACCOUNT_NAME, FIELD_BASE_URL, FIELD_INSECURE,
    SHEERID_ENDPOINT_SANDBOX,
};

/// Everything a client needs to talk to one SheerID account.
///
/// Equality only considers the access token, base URL and API version;
/// verbosity, TLS leniency and timeout are transport knobs.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Bearer token, possibly delegated (`token/account_name`). Never
    /// serialized.
    #[serde(skip_serializing, default)]
    pub access_token: String,
    /// Service root, e.g. `https://services.sheerid.com`
    pub base_url: String,
    /// REST namespace version
    pub api_version: String,
    /// Log request details at info level
    pub verbose: bool,
    /// Skip server certificate validation
    pub insecure: bool,
    /// Per-request timeout; `None` blocks until the transport resolves
    #[serde(default)]
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Config for the sandbox endpoint with default version and flags.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: SHEERID_ENDPOINT_SANDBOX.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            verbose: false,
            insecure: false,
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full URL for a resource path (`path` starts with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}/rest/{}{}", self.base_url.trim_end_matches('/'), self.api_version, path)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("access_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("verbose", &self.verbose)
            .field("insecure", &self.insecure)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl PartialEq for ClientConfig {
    fn eq(&self, other: &Self) -> bool {
        self.access_token == other.access_token
            && self.base_url == other.base_url
            && self.api_version == other.api_version
    }
}

impl Eq for ClientConfig {}

/// One named section from a config store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub name: String,
    pub fields: BTreeMap<String, String>,
}

impl InstanceRecord {
    pub fn new(name: impl Into<String>, fields: BTreeMap<String, String>) -> Self {
        Self { name: name.into(), fields }
    }

    /// Field value, with empty strings treated as absent.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    pub fn access_token(&self) -> Option<&str> {
        self.field(FIELD_ACCESS_TOKEN)
    }

    pub fn base_url(&self) -> Option<&str> {
        self.field(FIELD_BASE_URL)
    }

    pub fn account_name(&self) -> Option<&str> {
        self.field(FIELD_ACCOUNT_NAME)
    }

    /// Only the literal `true` enables insecure mode.
    pub fn insecure(&self) -> bool {
        self.field(FIELD_INSECURE) == Some("true")
    }
}
