// system-tests/src/client.rs
// ============================================================================
// Module: Products HTTP Client
// Description: Thin REST client for the products resource.
// Purpose: Issue GET/POST/PUT/DELETE with transcripts and decoded JSON bodies.
// Dependencies: reqwest, serde, serde_json, tracing
// ============================================================================

//! ## Overview
//! One operation per HTTP verb, parameterized by resource path and optional
//! JSON body. Each exchange resolves to an [`ApiResponse`] carrying status,
//! lower-cased headers, the decoded JSON body and elapsed time, and is
//! appended to a shared transcript. Transport failures are recorded too.
//!
//! The client applies the configured per-request deadline and nothing else:
//! no retries, no circuit breaking. Idempotency is a property of the remote
//! service and is observed, not enforced.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use products_contract::ProductPayload;
use reqwest::Client;
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use tracing::warn;

use crate::config::SuiteConfig;
use crate::config::endpoints;
use crate::config::endpoints::SortOrder;

// ============================================================================
// SECTION: Types
// ============================================================================

/// HTTP verbs used against the products resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApiMethod {
    /// Read.
    Get,
    /// Create.
    Post,
    /// Replace.
    Put,
    /// Remove.
    Delete,
}

impl ApiMethod {
    /// Returns the wire name of the verb.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ApiMethod> for reqwest::Method {
    fn from(method: ApiMethod) -> Self {
        match method {
            ApiMethod::Get => Self::GET,
            ApiMethod::Post => Self::POST,
            ApiMethod::Put => Self::PUT,
            ApiMethod::Delete => Self::DELETE,
        }
    }
}

/// Resolved response of one exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers keyed by lower-cased name.
    pub headers: BTreeMap<String, String>,
    /// Decoded JSON body; [`Value::Null`] when empty or not JSON.
    pub json: Value,
    /// Raw body text.
    pub raw_body: String,
    /// Time from send to body fully read.
    pub elapsed: Duration,
}

impl ApiResponse {
    /// Returns a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Returns the `content-type` header.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE.as_str())
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns true for 4xx statuses.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Returns true for 5xx statuses.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= endpoints::status::INTERNAL_SERVER_ERROR
    }

    /// Returns true when the body is empty, `null`, or not JSON.
    #[must_use]
    pub fn is_empty_body(&self) -> bool {
        self.json.is_null()
    }

    /// Returns a top-level body field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.json.get(name)
    }

    /// Decodes the JSON body into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] when the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_value(self.json.clone()).map_err(|err| ClientError::Decode(err.to_string()))
    }
}

/// One recorded exchange.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    /// 1-based position in the transcript.
    pub sequence: u64,
    /// HTTP verb.
    pub method: ApiMethod,
    /// Request path, including any query string.
    pub path: String,
    /// Submitted JSON body.
    pub request: Option<Value>,
    /// Response status when one arrived.
    pub status: Option<u16>,
    /// Decoded response body.
    pub response: Value,
    /// Milliseconds from send to completion.
    pub elapsed_ms: u64,
    /// Failure message when the exchange did not complete.
    pub error: Option<String>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Client construction and transport failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Base URL and path do not form a valid URL.
    #[error("invalid request url `{url}`: {reason}")]
    InvalidUrl {
        /// Attempted URL.
        url: String,
        /// Parser message.
        reason: String,
    },
    /// The underlying HTTP client could not be built.
    #[error("failed to build http client: {0}")]
    Build(String),
    /// The request exceeded the configured deadline.
    #[error("{method} {path} timed out: {reason}")]
    Timeout {
        /// HTTP verb.
        method: ApiMethod,
        /// Request path.
        path: String,
        /// Transport message.
        reason: String,
    },
    /// The request failed before a response arrived.
    #[error("{method} {path} failed: {reason}")]
    Transport {
        /// HTTP verb.
        method: ApiMethod,
        /// Request path.
        path: String,
        /// Transport message.
        reason: String,
    },
    /// The response body could not be read.
    #[error("failed to read {method} {path} response body: {reason}")]
    Body {
        /// HTTP verb.
        method: ApiMethod,
        /// Request path.
        path: String,
        /// Transport message.
        reason: String,
    },
    /// The JSON body did not match the requested type.
    #[error("failed to decode response body: {0}")]
    Decode(String),
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Products REST client with transcript capture.
#[derive(Clone)]
pub struct ProductsClient {
    /// Base URL without trailing slash.
    base_url: String,
    /// Shared HTTP client.
    client: Client,
    /// Recorded exchanges.
    transcript: Arc<Mutex<Vec<TranscriptEntry>>>,
}

impl fmt::Debug for ProductsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductsClient").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl ProductsClient {
    /// Creates a client for the configured service and deadline.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Build`] when the HTTP client cannot be built.
    pub fn new(config: &SuiteConfig) -> Result<Self, ClientError> {
        Self::with_timeout(config.base_url_str(), config.timeout)
    }

    /// Creates a client for an explicit base URL and deadline.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Build`] when the HTTP client cannot be built.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ClientError::Build(err.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            transcript: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a snapshot of the transcript entries.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Issues a GET.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on URL, transport, or body failures.
    pub async fn get(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.send(ApiMethod::Get, path, None).await
    }

    /// Issues a POST with an arbitrary JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on URL, transport, or body failures.
    pub async fn create(&self, path: &str, body: &Value) -> Result<ApiResponse, ClientError> {
        self.send(ApiMethod::Post, path, Some(body)).await
    }

    /// Issues a PUT with an arbitrary JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on URL, transport, or body failures.
    pub async fn update(&self, path: &str, body: &Value) -> Result<ApiResponse, ClientError> {
        self.send(ApiMethod::Put, path, Some(body)).await
    }

    /// Issues a DELETE.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on URL, transport, or body failures.
    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.send(ApiMethod::Delete, path, None).await
    }

    /// Lists every product.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on URL, transport, or body failures.
    pub async fn list_products(&self) -> Result<ApiResponse, ClientError> {
        self.get(&endpoints::products()).await
    }

    /// Lists products with optional `limit` and `sort`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on URL, transport, or body failures.
    pub async fn list_products_with(
        &self,
        limit: Option<usize>,
        sort: Option<SortOrder>,
    ) -> Result<ApiResponse, ClientError> {
        self.get(&endpoints::products_query(limit, sort)).await
    }

    /// Fetches one product.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on URL, transport, or body failures.
    pub async fn get_product(&self, id: impl fmt::Display) -> Result<ApiResponse, ClientError> {
        self.get(&endpoints::product(id)).await
    }

    /// Creates a product from a well-formed payload.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on URL, transport, or body failures.
    pub async fn create_product(
        &self,
        payload: &ProductPayload,
    ) -> Result<ApiResponse, ClientError> {
        self.create(&endpoints::products(), &payload.to_value()).await
    }

    /// Replaces a product with a well-formed payload.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on URL, transport, or body failures.
    pub async fn update_product(
        &self,
        id: impl fmt::Display,
        payload: &ProductPayload,
    ) -> Result<ApiResponse, ClientError> {
        self.update(&endpoints::product(id), &payload.to_value()).await
    }

    /// Deletes one product.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on URL, transport, or body failures.
    pub async fn delete_product(&self, id: impl fmt::Display) -> Result<ApiResponse, ClientError> {
        self.delete(&endpoints::product(id)).await
    }

    /// Sends one request and records it.
    async fn send(
        &self,
        method: ApiMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.url_for(path)?;
        let mut request = self.client.request(method.into(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(method = method.as_str(), path, "sending request");
        let started = Instant::now();
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                let error = classify_send_error(method, path, &err);
                warn!(method = method.as_str(), path, error = %error, "request failed");
                self.record(method, path, body, None, Value::Null, started.elapsed(), Some(&error));
                return Err(error);
            }
        };

        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                let error = classify_body_error(method, path, &err);
                self.record(
                    method,
                    path,
                    body,
                    Some(status),
                    Value::Null,
                    started.elapsed(),
                    Some(&error),
                );
                return Err(error);
            }
        };
        let elapsed = started.elapsed();
        let raw_body = String::from_utf8_lossy(&bytes).into_owned();
        let json = decode_body(&raw_body);
        debug!(
            method = method.as_str(),
            path,
            status,
            elapsed_ms = duration_millis(elapsed),
            "received response"
        );
        self.record(method, path, body, Some(status), json.clone(), elapsed, None);

        Ok(ApiResponse {
            status,
            headers,
            json,
            raw_body,
            elapsed,
        })
    }

    /// Joins the base URL and a path.
    fn url_for(&self, path: &str) -> Result<Url, ClientError> {
        let raw = if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        };
        Url::parse(&raw).map_err(|err| ClientError::InvalidUrl {
            url: raw.clone(),
            reason: err.to_string(),
        })
    }

    /// Appends an exchange to the transcript.
    #[allow(clippy::too_many_arguments, reason = "Mirrors the transcript entry fields.")]
    fn record(
        &self,
        method: ApiMethod,
        path: &str,
        request: Option<&Value>,
        status: Option<u16>,
        response: Value,
        elapsed: Duration,
        error: Option<&ClientError>,
    ) {
        let Ok(mut guard) = self.transcript.lock() else {
            return;
        };
        let sequence = u64::try_from(guard.len()).unwrap_or(u64::MAX).saturating_add(1);
        guard.push(TranscriptEntry {
            sequence,
            method,
            path: path.to_string(),
            request: request.cloned(),
            status,
            response,
            elapsed_ms: duration_millis(elapsed),
            error: error.map(ToString::to_string),
        });
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Decodes a body as JSON, mapping empty or non-JSON text to `null`.
#[must_use]
pub fn decode_body(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(trimmed).unwrap_or(Value::Null)
}

/// Collects headers into a lower-cased map, dropping non-text values.
fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value.to_str().ok().map(|value| (name.as_str().to_ascii_lowercase(), value.to_string()))
        })
        .collect()
}

/// Maps a reqwest send failure onto the client taxonomy.
fn classify_send_error(method: ApiMethod, path: &str, err: &reqwest::Error) -> ClientError {
    let path = path.to_string();
    let reason = err.to_string();
    if err.is_timeout() {
        ClientError::Timeout {
            method,
            path,
            reason,
        }
    } else {
        ClientError::Transport {
            method,
            path,
            reason,
        }
    }
}

/// Maps a body read failure onto the client taxonomy.
fn classify_body_error(method: ApiMethod, path: &str, err: &reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::Timeout {
            method,
            path: path.to_string(),
            reason: err.to_string(),
        };
    }
    ClientError::Body {
        method,
        path: path.to_string(),
        reason: err.to_string(),
    }
}

/// Converts a duration to whole milliseconds, saturating.
fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
