//! The single HTTP transport shared by every API operation.
//!
//! [`TransportConfig`] fixes the base URL, timeout, and default headers once.
//! [`HttpTransport`] builds one `reqwest::Client` from it and never rebinds
//! those settings; per-call variation is limited to what an
//! [`OutboundRequest`] carries (method, path, query, content handling).
//!
//! The [`Transport`] trait is the seam the interceptor pipeline wraps and the
//! seam tests use to substitute a stand-in.

use std::time::Duration;

use async_trait::async_trait;
use config_model::{ClientError, ContentHandling, Payload};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Method, Url};
use serde_json::Value;
use tracing::debug;

/// Endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8888";

/// Timeout applied to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Settings the transport is built from.
///
/// Adjustable only until it is handed to [`HttpTransport::new`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    base_url: Url,
    timeout: Duration,
    default_headers: HeaderMap,
}

impl TransportConfig {
    /// Validates `base_url` and applies the default timeout and
    /// `Content-Type: application/json`.
    ///
    /// A base URL that does not parse, is not `http`/`https`, or carries a
    /// query or fragment is a [`ClientError::Configuration`].
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url).map_err(|e| ClientError::Configuration {
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Configuration {
                message: format!(
                    "unsupported base URL scheme '{}' in '{base_url}'",
                    parsed.scheme()
                ),
            });
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(ClientError::Configuration {
                message: format!("base URL '{base_url}' must not carry a query or fragment"),
            });
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            base_url: parsed,
            timeout: DEFAULT_TIMEOUT,
            default_headers,
        })
    }

    /// Overrides the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds or replaces a default header sent with every request.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, ClientError> {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| ClientError::Configuration {
                message: format!("invalid header name '{name}': {e}"),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| ClientError::Configuration {
            message: format!("invalid value for header '{name}': {e}"),
        })?;
        self.default_headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the headers attached to every request.
    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }
}

// ---------------------------------------------------------------------------
// Request / response shapes
// ---------------------------------------------------------------------------

/// Everything one call may vary: method, path, query, and body handling.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    content: ContentHandling,
}

impl OutboundRequest {
    /// Creates a request with the default JSON content handling.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            content: ContentHandling::default(),
        }
    }

    /// Shorthand for a `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Shorthand for a `POST` request without a body.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Overrides how the success body is handled for this call only.
    #[must_use]
    pub fn content(mut self, content: ContentHandling) -> Self {
        self.content = content;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn content_handling(&self) -> ContentHandling {
        self.content
    }
}

/// A success response before the interceptor pipeline unwraps it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code (always 2xx).
    pub status: u16,
    /// Final request URL, including the query string.
    pub url: String,
    /// Body, handled per the request's [`ContentHandling`].
    pub payload: Payload,
}

// ---------------------------------------------------------------------------
// Transport trait
// ---------------------------------------------------------------------------

/// Sends one request and classifies the outcome.
///
/// Implementations return `Ok` only for 2xx responses; every other outcome is
/// a [`ClientError`]. They perform exactly one round trip and never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &OutboundRequest) -> Result<TransportResponse, ClientError>;
}

// ---------------------------------------------------------------------------
// reqwest implementation
// ---------------------------------------------------------------------------

/// [`Transport`] over a single `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: TransportConfig,
}

impl HttpTransport {
    /// Builds the HTTP client. The configuration is frozen from here on.
    pub fn new(config: TransportConfig) -> Result<Self, ClientError> {
        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .default_headers(config.default_headers.clone())
            .build()
            .map_err(|e| ClientError::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client, config })
    }

    /// Returns the configuration the client was built from.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Joins the base URL and a request path.
    ///
    /// Path segments are used verbatim; a base URL path prefix is preserved.
    fn url_for(&self, path: &str) -> Result<Url, ClientError> {
        let base = self.config.base_url.as_str().trim_end_matches('/');
        let joined = format!("{base}{path}");
        Url::parse(&joined).map_err(|e| ClientError::InvalidRequest {
            message: format!("cannot build URL from '{joined}': {e}"),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &OutboundRequest) -> Result<TransportResponse, ClientError> {
        let url = self.url_for(request.path())?;
        let mut builder = self.client.request(request.method().clone(), url);
        if !request.query_params().is_empty() {
            builder = builder.query(request.query_params());
        }

        let response = builder.send().await.map_err(transport_failure)?;
        let status = response.status();
        let url = response.url().to_string();

        if !status.is_success() {
            // Buffer the body so the failure message carries what the server said.
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!(status = status.as_u16(), error = %e, "failed to read error body");
                    String::new()
                }
            };
            let message = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body
            };
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await.map_err(transport_failure)?;
        let payload = match request.content_handling() {
            ContentHandling::ParseJson => Payload::Json(parse_json(&bytes)?),
            ContentHandling::PassthroughText => Payload::Text(decode_text(&bytes)),
        };

        Ok(TransportResponse {
            status: status.as_u16(),
            url,
            payload,
        })
    }
}

/// Maps a reqwest error to a status-less transport failure.
fn transport_failure(error: reqwest::Error) -> ClientError {
    ClientError::Transport {
        timed_out: error.is_timeout(),
        message: error.to_string(),
    }
}

/// Decodes a text body. Invalid UTF-8 sequences become U+FFFD.
fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Parses a JSON body; an empty body is `null`.
fn parse_json(bytes: &[u8]) -> Result<Value, ClientError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|e| ClientError::Decode {
        message: format!("response body is not valid JSON: {e}"),
    })
}
