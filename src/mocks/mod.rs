//! Mock implementations for testing.
//!
//! [`MockHttpTransport`] replays queued responses and records every request,
//! so services and error classification can be exercised without a server.

use crate::errors::{MandrillResult, NetworkError};
use crate::transport::{HttpTransport, TransportRequest, TransportResponse};
use async_trait::async_trait;
use http::StatusCode;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;

/// Mock response configuration
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// Response body
    pub body: String,
    /// HTTP status code
    pub status: u16,
    /// Delay before response
    pub delay_ms: Option<u64>,
    /// Fail with a timeout instead of responding
    pub timeout: bool,
}

impl MockResponse {
    /// Create a JSON response
    pub fn json(status: u16, data: Value) -> Self {
        Self::raw(status, data.to_string())
    }

    /// Create a 200 response with a raw body
    pub fn ok(body: impl Into<String>) -> Self {
        Self::raw(200, body)
    }

    /// Create a response with any status and raw body
    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            status,
            delay_ms: None,
            timeout: false,
        }
    }

    /// Create a Mandrill error envelope response
    pub fn api_error(status: u16, name: &str, message: &str, code: i64) -> Self {
        Self::json(
            status,
            serde_json::json!({
                "status": "error",
                "code": code,
                "name": name,
                "message": message,
            }),
        )
    }

    /// Simulate a request timeout
    pub fn timed_out() -> Self {
        Self {
            timeout: true,
            ..Self::raw(0, "")
        }
    }

    /// Add delay to response
    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = Some(ms);
        self
    }
}

/// Recorded request for verification
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Request method
    pub method: String,
    /// Request body
    pub body: String,
    /// Request headers
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Body decoded as JSON, `null` if it is not JSON
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }

    /// Endpoint path relative to the versioned root, e.g. `messages/send`
    pub fn endpoint(&self) -> Option<&str> {
        let path = self.url.strip_suffix(".json")?;
        let version = format!("/{}/", crate::API_VERSION);
        let start = path.find(&version)? + version.len();
        Some(&path[start..])
    }

    /// Header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Mock HTTP transport for testing
pub struct MockHttpTransport {
    /// Queue of responses to return
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Recorded requests
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    /// Default response if queue is empty
    default_response: Option<MockResponse>,
}

impl Default for MockHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHttpTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            default_response: None,
        }
    }

    /// Add a response to the queue
    pub fn add_response(self, response: MockResponse) -> Self {
        self.enqueue(response);
        self
    }

    /// Queue a response on a shared transport
    pub fn enqueue(&self, response: MockResponse) {
        self.responses.lock().push_back(response);
    }

    /// Set default response when queue is empty
    pub fn with_default_response(mut self, response: MockResponse) -> Self {
        self.default_response = Some(response);
        self
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Get the last recorded request
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().last().cloned()
    }

    /// Clear recorded requests
    pub fn clear_requests(&self) {
        self.requests.lock().clear();
    }

    /// Get remaining response count
    pub fn remaining_responses(&self) -> usize {
        self.responses.lock().len()
    }

    fn record_request(&self, request: &TransportRequest) {
        let headers = request
            .headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        self.requests.lock().push(RecordedRequest {
            url: request.url.clone(),
            method: request.method.to_string(),
            body: String::from_utf8_lossy(&request.body).into_owned(),
            headers,
        });
    }

    fn next_response(&self) -> Option<MockResponse> {
        let mut queue = self.responses.lock();
        queue.pop_front().or_else(|| self.default_response.clone())
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: TransportRequest) -> MandrillResult<TransportResponse> {
        self.record_request(&request);

        let response = self.next_response().ok_or_else(|| NetworkError::RequestFailed {
            url: request.url.clone(),
            message: "No mock response queued".to_string(),
        })?;

        if let Some(delay) = response.delay_ms {
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }

        if response.timeout {
            return Err(NetworkError::Timeout { url: request.url }.into());
        }

        let status = StatusCode::from_u16(response.status).map_err(|e| {
            NetworkError::RequestFailed {
                url: request.url.clone(),
                message: e.to_string(),
            }
        })?;

        Ok(TransportResponse::new(status, response.body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_in_order_and_records() {
        let transport = MockHttpTransport::new()
            .add_response(MockResponse::ok("1"))
            .add_response(MockResponse::ok("2"));

        let url = "https://mandrillapp.com/api/1.0/tags/list.json";
        let first = transport
            .send(TransportRequest::post_json(url, r#"{"key":"k"}"#))
            .await
            .unwrap();
        let second = transport
            .send(TransportRequest::post_json(url, "{}"))
            .await
            .unwrap();

        assert_eq!(first.body, "1");
        assert_eq!(second.body, "2");
        assert_eq!(transport.remaining_responses(), 0);

        let recorded = transport.recorded_requests();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].endpoint(), Some("tags/list"));
        assert_eq!(recorded[0].json()["key"], "k");
        assert_eq!(recorded[0].header("content-type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_empty_queue_fails() {
        let transport = MockHttpTransport::new();
        let result = transport
            .send(TransportRequest::post_json("http://localhost/1.0/x.json", "{}"))
            .await;
        assert!(result.is_err());
    }
}
