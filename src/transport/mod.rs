//! HTTP transport layer for the Mandrill client.
//!
//! Provides the low-level POST to the API and the classification of the
//! response into a decoded value or a typed error.

use crate::config::MandrillConfig;
use crate::errors::{
    ApiError, ConfigurationError, MandrillResult, NetworkError, ResponseError,
};
use async_trait::async_trait;
use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, Method, StatusCode};
use reqwest::{redirect, Client, ClientBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::{instrument, warn};

/// Maximum number of redirects followed
pub const MAX_REDIRECTS: usize = 10;

/// HTTP transport trait for sending API requests
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a request and return the raw response
    async fn send(&self, request: TransportRequest) -> MandrillResult<TransportResponse>;
}

/// Outgoing request
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method
    pub method: Method,
    /// Full endpoint URL
    pub url: String,
    /// Request headers
    pub headers: HeaderMap,
    /// Encoded body
    pub body: Bytes,
}

impl TransportRequest {
    /// Create a JSON POST request
    pub fn post_json(url: impl Into<String>, body: impl Into<Bytes>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self {
            method: Method::POST,
            url: url.into(),
            headers,
            body: body.into(),
        }
    }
}

/// Raw response
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Response body
    pub body: String,
}

impl TransportResponse {
    /// Create a response
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Classify a response
///
/// A body that is not JSON is an [`ResponseError::InvalidJson`] whatever the
/// status. A 4xx or 5xx status is an [`ApiError`] built from the error
/// envelope. Anything else is returned decoded and untouched.
pub fn classify_response(response: &TransportResponse) -> MandrillResult<Value> {
    let json: Value =
        serde_json::from_str(&response.body).map_err(|e| ResponseError::InvalidJson {
            body: response.body.clone(),
            message: e.to_string(),
        })?;

    if response.status.as_u16() / 100 >= 4 {
        return Err(error_from_envelope(&json).into());
    }

    Ok(json)
}

/// Build the API error described by an error envelope
///
/// The envelope must carry `"status": "error"` and a non-empty `name`;
/// otherwise the error is [`crate::ApiErrorKind::Unexpected`] with the
/// envelope as its message.
pub fn error_from_envelope(json: &Value) -> ApiError {
    let status = json.get("status").and_then(Value::as_str);
    let name = json
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty());

    match (status, name) {
        (Some("error"), Some(name)) => {
            let message = json.get("message").and_then(Value::as_str).unwrap_or("");
            let code = json.get("code").and_then(Value::as_i64).unwrap_or(0);
            ApiError::from_name(name, message, code)
        }
        _ => {
            warn!(envelope = %json, "Malformed error envelope");
            ApiError::unexpected(format!("We received an unexpected error: {}", json))
        }
    }
}

/// Default HTTP transport implementation using reqwest
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
    connect_timeout: Duration,
}

impl ReqwestTransport {
    /// Create a transport with the timeouts, user agent and debug flag of `config`
    pub fn new(config: &MandrillConfig) -> MandrillResult<Self> {
        let client = ClientBuilder::new()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .connection_verbose(config.debug)
            .build()
            .map_err(|e| ConfigurationError::InvalidConfiguration {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            timeout: config.timeout,
            connect_timeout: config.connect_timeout,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: TransportRequest) -> MandrillResult<TransportResponse> {
        let url = request.url;

        let response = self
            .client
            .request(request.method, &url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| NetworkError::from_reqwest(&url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NetworkError::from_reqwest(&url, e))?;

        Ok(TransportResponse { status, body })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}
