//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the SheerID client
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum SheerIdError {
    /// The master segment of an instance name failed validation.
    #[error("Invalid instance name: {name}")]
    InvalidInstanceName { name: String },

    /// Neither config store has the section, or a required field is absent.
    #[error("Configuration not found: {0}")]
    ConfigNotFound(String),

    /// The instance record has no `base_url`. Never defaulted.
    #[error("Instance '{instance}' has no base_url configured")]
    MissingBaseUrl { instance: String },

    /// A config file exists but could not be read.
    #[error("Failed to read config file {path}: {message}")]
    ConfigIo { path: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    /// A byte-valued parameter was not valid UTF-8.
    #[error("Parameter '{key}' is not valid UTF-8: {message}")]
    Encoding { key: String, message: String },

    /// DNS, connection, TLS or timeout failure.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// A non-empty response body that could not be interpreted.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A bulk upload stopped part way. Chunks already sent stay on the server.
    #[error("Bulk upload interrupted after {submitted_chunks} of {total_chunks} chunks: {source}")]
    BulkUploadInterrupted {
        submitted_chunks: usize,
        total_chunks: usize,
        #[source]
        source: Box<SheerIdError>,
    },
}

impl SheerIdError {
    /// HTTP status carried by this error, looking through bulk-upload wrapping.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::BulkUploadInterrupted { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Whether the error came from instance configuration rather than the network.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInstanceName { .. }
                | Self::ConfigNotFound(_)
                | Self::MissingBaseUrl { .. }
                | Self::ConfigIo { .. }
                | Self::Config(_)
        )
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, SheerIdError>;
