//! Conversions from external infrastructure errors into domain errors.

use std::io::ErrorKind;
use std::path::Path;

use reqwest::Error as HttpError;
use sheerid_domain::SheerIdError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SheerIdError);

impl From<InfraError> for SheerIdError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SheerIdError> for InfraError {
    fn from(value: SheerIdError) -> Self {
        Self(value)
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → SheerIdError */
/* -------------------------------------------------------------------------- */

// Only transport-level failures reach here; HTTP status codes are mapped by
// the executor from the response itself.
impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        if value.is_timeout() {
            return Self(SheerIdError::Transport(format!("HTTP request timed out: {value}")));
        }

        if value.is_connect() {
            return Self(SheerIdError::Transport(format!("HTTP connection failure: {value}")));
        }

        if value.is_builder() {
            return Self(SheerIdError::Transport(format!("invalid HTTP request: {value}")));
        }

        Self(SheerIdError::Transport(value.to_string()))
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → SheerIdError */
/* -------------------------------------------------------------------------- */

/// Read a config file, treating a missing file as absent.
///
/// # Errors
/// `SheerIdError::ConfigIo` for every failure other than `NotFound`
/// (permissions, a directory in place of a file, invalid UTF-8).
pub fn read_optional(path: &Path) -> Result<Option<String>, SheerIdError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(SheerIdError::ConfigIo {
            path: path.display().to_string(),
            message: err.to_string(),
        }),
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
