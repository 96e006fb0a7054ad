//! Outgoing request description

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::params::Params;
use crate::impl_wire_name_conversions;

/// HTTP verbs used by the REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl_wire_name_conversions!(HttpMethod {
    Get => "GET",
    Post => "POST",
    Put => "PUT",
    Delete => "DELETE",
});

impl HttpMethod {
    /// GET and DELETE put parameters in the query string and send no body.
    pub fn uses_query_string(&self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }
}

/// One request, built fresh for every call and consumed by a transport.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub params: Params,
    /// Caller-supplied headers. The transport adds `Authorization` and, for
    /// form bodies, `Content-Type`; everything else is sent as given.
    pub headers: BTreeMap<String, String>,
    /// Raw body sent verbatim instead of the encoded params (POST/PUT only).
    pub body: Option<String>,
    #[serde(skip_serializing, default)]
    pub access_token: String,
}

impl std::fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("params", &self.params)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

impl ApiRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            params: Params::new(),
            headers: BTreeMap::new(),
            body: None,
            access_token: access_token.into(),
        }
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_methods() {
        assert!(HttpMethod::Get.uses_query_string());
        assert!(HttpMethod::Delete.uses_query_string());
        assert!(!HttpMethod::Post.uses_query_string());
        assert!(!HttpMethod::Put.uses_query_string());
    }

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!("put".parse::<HttpMethod>().unwrap(), HttpMethod::Put);
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
        assert!("PATCH".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn token_is_kept_out_of_debug_and_json() {
        let request = ApiRequest::new(HttpMethod::Get, "https://example.test", "secret");
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("secret"));
        assert!(!format!("{request:?}").contains("secret"));
    }
}
