use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::Client as ReqwestClient;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use sheerid_core::params;
use sheerid_core::Transport;
use sheerid_domain::constants::FORM_CONTENT_TYPE;
use sheerid_domain::{ApiRequest, ClientConfig, HttpMethod, Result, SheerIdError};
use tracing::{debug, info};

use crate::errors::InfraError;

const REDACTED: &str = "Bearer <redacted>";

/// Blocking HTTP executor backing the [`Transport`] port.
///
/// One round trip per call, no retries. TLS verification, verbosity and
/// timeout are fixed at build time.
#[derive(Clone, Debug)]
pub struct HttpExecutor {
    client: ReqwestClient,
    verbose: bool,
}

impl HttpExecutor {
    /// Start building a new executor.
    pub fn builder() -> HttpExecutorBuilder {
        HttpExecutorBuilder::default()
    }

    /// Executor configured from a client's transport flags.
    ///
    /// # Errors
    /// Returns `SheerIdError::Transport` if the TLS backend cannot be
    /// initialised.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = Self::builder().insecure(config.insecure).verbose(config.verbose);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    fn log_request(&self, method: &Method, url: &str, headers: &HeaderMap, body: Option<&str>) {
        let headers = redacted(headers);
        let body = body.unwrap_or("");
        if self.verbose {
            info!(%method, url, ?headers, body, "sending request");
        } else {
            debug!(%method, url, ?headers, body, "sending request");
        }
    }
}

impl Transport for HttpExecutor {
    fn execute(&self, request: ApiRequest) -> Result<Vec<u8>> {
        let ApiRequest { method, url, params, headers, body, access_token } = request;
        let encoded = params::encode(&params)?;

        let mut header_map = header_map(&headers)?;
        let bearer = HeaderValue::from_str(&format!("Bearer {access_token}")).map_err(|e| {
            SheerIdError::Encoding { key: AUTHORIZATION.to_string(), message: e.to_string() }
        })?;
        header_map.insert(AUTHORIZATION, bearer);

        let (url, body) = if method.uses_query_string() {
            if body.is_some() {
                debug!(%method, "dropping body on query-string request");
            }
            (with_query(&url, &encoded), None)
        } else if body.is_some() {
            (url, body)
        } else {
            header_map.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
            (url, Some(encoded))
        };

        let method = reqwest_method(method);
        self.log_request(&method, &url, &header_map, body.as_deref());

        let mut builder = self.client.request(method.clone(), &url).headers(header_map);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().map_err(|err| SheerIdError::from(InfraError::from(err)))?;
        let status = response.status();
        let bytes = response.bytes().map_err(|err| SheerIdError::from(InfraError::from(err)))?;
        debug!(%method, url = %url, status = status.as_u16(), len = bytes.len(), "received response");

        if !status.is_success() {
            return Err(SheerIdError::HttpStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(bytes.to_vec())
    }
}

/// Builder for [`HttpExecutor`].
#[derive(Debug, Default)]
pub struct HttpExecutorBuilder {
    timeout: Option<Duration>,
    insecure: bool,
    verbose: bool,
    user_agent: Option<String>,
}

impl HttpExecutorBuilder {
    /// Total per-request timeout. Without one, requests block until the
    /// connection resolves.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Accept any server certificate.
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Log request details at `info` instead of `debug`.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// # Errors
    /// Returns `SheerIdError::Transport` if the underlying client cannot be
    /// built.
    pub fn build(self) -> Result<HttpExecutor> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout);

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if self.insecure {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(|err| SheerIdError::from(InfraError::from(err)))?;

        Ok(HttpExecutor { client, verbose: self.verbose })
    }
}

fn reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len() + 2);
    for (name, value) in headers {
        let invalid = |message: String| SheerIdError::Encoding { key: name.clone(), message };
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

fn redacted(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = if name == AUTHORIZATION {
                REDACTED.to_string()
            } else {
                String::from_utf8_lossy(value.as_bytes()).into_owned()
            };
            (name.to_string(), value)
        })
        .collect()
}

/// Append an encoded query to `url`; an empty query leaves it untouched.
fn with_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        url.to_string()
    } else if url.contains('?') {
        format!("{url}&{query}")
    } else {
        format!("{url}?{query}")
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::sync::{Arc, Mutex};

    use sheerid_domain::Params;
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    // reqwest::blocking must not run on a runtime worker thread.
    async fn execute(request: ApiRequest) -> Result<Vec<u8>> {
        tokio::task::spawn_blocking(move || HttpExecutor::builder().build()?.execute(request))
            .await
            .unwrap()
    }

    /// In-memory sink for formatted log lines.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// POST through an executor with the given verbosity and return what an
    /// info-level subscriber printed. Must run off the runtime threads.
    fn logged_post(verbose: bool, url: String) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let req = request(HttpMethod::Post, url)
                .with_params(Params::new().with("name", "Reserve"));
            HttpExecutor::builder().verbose(verbose).build()?.execute(req)
        })
        .unwrap();

        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn request(method: HttpMethod, url: String) -> ApiRequest {
        ApiRequest::new(method, url, "secret-token")
    }

    #[test]
    fn query_is_appended_only_when_present() {
        assert_eq!(with_query("https://a/b", ""), "https://a/b");
        assert_eq!(with_query("https://a/b", "x=1"), "https://a/b?x=1");
        assert_eq!(with_query("https://a/b?y=2", "x=1"), "https://a/b?y=2&x=1");
    }

    #[test]
    fn authorization_is_redacted_for_logging() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer secret-token"));
        headers.insert("x-trace", HeaderValue::from_static("1"));

        let logged = redacted(&headers);
        assert_eq!(logged["authorization"], REDACTED);
        assert_eq!(logged["x-trace"], "1");
    }

    #[test]
    fn invalid_header_name_is_encoding_error() {
        let mut headers = BTreeMap::new();
        headers.insert("bad header".to_string(), "v".to_string());
        assert!(matches!(header_map(&headers), Err(SheerIdError::Encoding { .. })));
    }

    #[tokio::test]
    async fn get_sends_params_in_query_with_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/0.5/organization"))
            .and(query_param("name", "Army Reserve"))
            .and(query_param("type", "MILITARY"))
            .and(header("authorization", "Bearer secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let params = Params::new().with("name", "Army Reserve").with("type", "MILITARY");
        let body = execute(
            request(HttpMethod::Get, format!("{}/rest/0.5/organization", server.uri()))
                .with_params(params),
        )
        .await
        .unwrap();

        assert_eq!(body, b"[]");
        let received = server.received_requests().await.unwrap();
        assert!(received[0].body.is_empty());
    }

    #[tokio::test]
    async fn post_sends_form_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/0.5/rewardPool/9"))
            .and(header("content-type", FORM_CONTENT_TYPE))
            .and(body_string("entry=A+1&entry=B%262"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut params = Params::new();
        params.append("entry", "A 1");
        params.append("entry", b"B&2".to_vec());
        let body = execute(
            request(HttpMethod::Post, format!("{}/rest/0.5/rewardPool/9", server.uri()))
                .with_params(params),
        )
        .await
        .unwrap();

        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn raw_body_is_sent_verbatim_and_caller_headers_survive() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(header("content-type", "application/json"))
            .and(header("x-trace", "abc"))
            .and(header("authorization", "Bearer secret-token"))
            .and(body_string(r#"{"a":1}"#))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let req = request(HttpMethod::Put, format!("{}/raw", server.uri()))
            .with_params(Params::new().with("ignored", "yes"))
            .with_header("Content-Type", "application/json")
            .with_header("X-Trace", "abc")
            .with_header("Authorization", "Basic caller")
            .with_body(r#"{"a":1}"#);
        assert_eq!(execute(req).await.unwrap(), b"ok");
    }

    #[tokio::test]
    async fn delete_drops_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(query_param("id", "3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let req = request(HttpMethod::Delete, format!("{}/reward", server.uri()))
            .with_params(Params::new().with("id", 3))
            .with_body("should not be sent");
        assert!(execute(req).await.unwrap().is_empty());

        let received = server.received_requests().await.unwrap();
        assert!(received[0].body.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
            .mount(&server)
            .await;

        let err = execute(request(HttpMethod::Get, server.uri())).await.unwrap_err();
        assert_eq!(err, SheerIdError::HttpStatus { status: 401, body: "bad token".into() });
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = execute(request(HttpMethod::Get, format!("http://{addr}"))).await.unwrap_err();
        assert!(matches!(err, SheerIdError::Transport(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn invalid_utf8_param_fails_before_sending() {
        let server = MockServer::start().await;
        let req = request(HttpMethod::Post, server.uri())
            .with_params(Params::new().with("raw", vec![0xFF]));

        assert!(matches!(execute(req).await, Err(SheerIdError::Encoding { .. })));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[test]
    fn from_config_carries_verbosity() {
        let verbose = ClientConfig::new("t").with_verbose(true).with_timeout(Duration::from_secs(5));
        assert!(HttpExecutor::from_config(&verbose).unwrap().verbose);
        assert!(!HttpExecutor::from_config(&ClientConfig::new("t")).unwrap().verbose);
    }

    #[tokio::test]
    async fn verbose_logs_request_at_info_with_token_redacted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(2)
            .mount(&server)
            .await;

        let url = format!("{}/rest/0.5/verification", server.uri());
        let (verbose, quiet) = tokio::task::spawn_blocking(move || {
            (logged_post(true, url.clone()), logged_post(false, url))
        })
        .await
        .unwrap();

        assert!(verbose.contains("INFO"), "verbose output: {verbose}");
        assert!(verbose.contains("sending request"));
        assert!(verbose.contains("/rest/0.5/verification"));
        assert!(verbose.contains("name=Reserve"));
        assert!(verbose.contains(REDACTED));
        assert!(!verbose.contains("secret-token"));

        assert!(!quiet.contains("sending request"), "quiet output: {quiet}");
        assert!(!quiet.contains("secret-token"));
    }
}
