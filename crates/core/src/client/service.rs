//! Verb-level client
//!
//! `SheerId` turns a resource path and parameters into an [`ApiRequest`] and
//! hands it to the configured [`Transport`]. Every call builds its own
//! request, params and headers; nothing is shared between calls.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use sheerid_domain::{ApiRequest, ClientConfig, HttpMethod, Params, Result, SheerIdError};
use tracing::{debug, instrument};

use super::ports::Transport;

/// Client for one SheerID account.
#[derive(Clone)]
pub struct SheerId {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl SheerId {
    /// Create a client
    ///
    /// # Arguments
    ///
    /// * `config` - Account, endpoint and transport flags
    /// * `transport` - Request executor
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `{base_url}/rest/{api_version}{path}`
    pub fn url(&self, path: &str) -> String {
        self.config.url(path)
    }

    /// Send a request with explicit headers and an optional raw body
    ///
    /// A raw body replaces the form-encoded params for POST/PUT.
    ///
    /// # Errors
    ///
    /// Returns whatever the transport reports: `Transport`, `HttpStatus` or
    /// `Encoding`.
    #[instrument(skip(self, params, headers, body))]
    pub fn request(
        &self,
        method: HttpMethod,
        path: &str,
        params: Params,
        headers: BTreeMap<String, String>,
        body: Option<String>,
    ) -> Result<Vec<u8>> {
        let mut request = ApiRequest::new(method, self.url(path), &self.config.access_token)
            .with_params(params)
            .with_headers(headers);
        request.body = body;

        debug!(path, "dispatching request");
        self.transport.execute(request)
    }

    /// GET `path` with `params` in the query string.
    pub fn get(&self, path: &str, params: Params) -> Result<Vec<u8>> {
        self.request(HttpMethod::Get, path, params, BTreeMap::new(), None)
    }

    /// POST `path` with `params` as a form body.
    pub fn post(&self, path: &str, params: Params) -> Result<Vec<u8>> {
        self.request(HttpMethod::Post, path, params, BTreeMap::new(), None)
    }

    /// PUT `path` with `params` as a form body.
    pub fn put(&self, path: &str, params: Params) -> Result<Vec<u8>> {
        self.request(HttpMethod::Put, path, params, BTreeMap::new(), None)
    }

    /// DELETE `path` with `params` in the query string.
    pub fn delete(&self, path: &str, params: Params) -> Result<Vec<u8>> {
        self.request(HttpMethod::Delete, path, params, BTreeMap::new(), None)
    }

    /// [`SheerId::get`] decoded as JSON; an empty body yields `None`.
    ///
    /// # Errors
    ///
    /// `Decode` when the body is non-empty and not JSON, plus any request error.
    pub fn get_json(&self, path: &str, params: Params) -> Result<Option<Value>> {
        decode_json(&self.get(path, params)?)
    }

    /// [`SheerId::post`] decoded as JSON; an empty body yields `None`.
    ///
    /// # Errors
    ///
    /// `Decode` when the body is non-empty and not JSON, plus any request error.
    pub fn post_json(&self, path: &str, params: Params) -> Result<Option<Value>> {
        decode_json(&self.post(path, params)?)
    }

    /// [`SheerId::put`] decoded as JSON; an empty body yields `None`.
    ///
    /// # Errors
    ///
    /// `Decode` when the body is non-empty and not JSON, plus any request error.
    pub fn put_json(&self, path: &str, params: Params) -> Result<Option<Value>> {
        decode_json(&self.put(path, params)?)
    }

    /// [`SheerId::delete`] decoded as JSON; an empty body yields `None`.
    ///
    /// # Errors
    ///
    /// `Decode` when the body is non-empty and not JSON, plus any request error.
    pub fn delete_json(&self, path: &str, params: Params) -> Result<Option<Value>> {
        decode_json(&self.delete(path, params)?)
    }
}

impl PartialEq for SheerId {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
    }
}

impl std::fmt::Debug for SheerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheerId").field("config", &self.config).finish_non_exhaustive()
    }
}

/// Decode a response body, treating an empty (or all-whitespace) body as no
/// value.
///
/// # Errors
///
/// `SheerIdError::Decode` for a non-empty body that is not valid JSON.
pub fn decode_json(body: &[u8]) -> Result<Option<Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| SheerIdError::Decode(format!("invalid JSON response: {e}")))
}

/// Text value of `key` on a JSON object. Numbers are rendered as text.
pub fn field_text(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Like [`field_text`] but a missing field is a `Decode` error.
///
/// # Errors
///
/// `SheerIdError::Decode` naming the missing field and the context.
pub fn require_field(value: Option<&Value>, key: &str, context: &str) -> Result<String> {
    value
        .and_then(|v| field_text(v, key))
        .ok_or_else(|| SheerIdError::Decode(format!("{context} response has no '{key}' field")))
}
