//! Client constants
//!
//! Endpoints, API version and wire-level limits shared by every crate in the
//! workspace.

// Endpoints
pub const SHEERID_ENDPOINT_PRODUCTION: &str = "https://services.sheerid.com";
pub const SHEERID_ENDPOINT_SANDBOX: &str = "https://services-sandbox.sheerid.com";

/// REST namespace version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "0.5";

// Bulk submission
pub const ENTRY_CHUNK_SIZE: usize = 500;
pub const ENTRY_PARAM: &str = "entry";

// Headers
pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// Instance record fields
pub const FIELD_ACCESS_TOKEN: &str = "access_token";
pub const FIELD_BASE_URL: &str = "base_url";
pub const FIELD_INSECURE: &str = "insecure";
pub const FIELD_ACCOUNT_NAME: &str = "account_name";

// Config discovery
pub const INSTANCE_DIR_NAME: &str = ".sheerid.d";
pub const AGGREGATE_FILE_NAME: &str = ".sheerid";
pub const ENV_INSTANCE_DIR: &str = "SHEERID_INSTANCE_DIR";
pub const ENV_CONFIG_FILE: &str = "SHEERID_CONFIG_FILE";
