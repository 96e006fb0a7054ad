//! Port interface for request execution

use sheerid_domain::{ApiRequest, Result};

/// Performs one HTTP round trip.
///
/// Implementations add the bearer token header, encode `request.params`
/// according to the method, and return the full response body of a 2xx
/// response. Non-2xx responses and transport failures are errors; nothing is
/// retried.
pub trait Transport: Send + Sync {
    fn execute(&self, request: ApiRequest) -> Result<Vec<u8>>;
}
