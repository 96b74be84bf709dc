//! Transport session: one key, one API root, one transport.

use crate::auth::AuthManager;
use crate::config::MandrillConfig;
use crate::errors::{MandrillResult, RequestError};
use crate::observability::{log_failure, log_request, log_response};
use crate::transport::{classify_response, HttpTransport, TransportRequest};
use crate::types::Params;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{instrument, Span};
use uuid::Uuid;

/// Immutable state shared by every call
///
/// Each call merges the API key into its parameters, POSTs them as JSON to
/// `{root}/{version}/{endpoint}.json` and classifies the response. Calls are
/// never retried.
pub struct Session {
    config: Arc<MandrillConfig>,
    auth: AuthManager,
    transport: Arc<dyn HttpTransport>,
}

impl Session {
    /// Create a session; the API key must already be resolved into `auth`
    pub fn new(
        config: Arc<MandrillConfig>,
        auth: AuthManager,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            config,
            auth,
            transport,
        }
    }

    /// Configuration
    pub fn config(&self) -> &MandrillConfig {
        &self.config
    }

    /// Authentication manager
    pub fn auth(&self) -> &AuthManager {
        &self.auth
    }

    /// Call an endpoint such as `messages/send` and return the decoded response
    #[instrument(skip(self, params), fields(endpoint = %endpoint, request_id = tracing::field::Empty))]
    pub async fn request(&self, endpoint: &str, params: Params) -> MandrillResult<Value> {
        let request_id = Uuid::new_v4().to_string();
        Span::current().record("request_id", request_id.as_str());

        let url = self.config.endpoint_url(endpoint);
        let params = self.auth.sign(params);
        let body = serde_json::to_vec(&params).map_err(|e| RequestError::Serialization {
            message: e.to_string(),
        })?;

        if self.config.debug {
            log_request(&request_id, &url, &params);
        }

        let start = Instant::now();
        let result = self
            .transport
            .send(TransportRequest::post_json(url, body))
            .await;

        let response = match result {
            Ok(response) => {
                if self.config.debug {
                    log_response(
                        &request_id,
                        response.status.as_u16(),
                        start.elapsed(),
                        &response.body,
                    );
                }
                response
            }
            Err(e) => {
                if self.config.debug {
                    log_failure(&request_id, start.elapsed(), &e);
                }
                return Err(e);
            }
        };

        classify_response(&response)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("auth", &self.auth)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ApiKey;
    use crate::config::MandrillConfigBuilder;
    use crate::errors::{ApiErrorKind, MandrillError};
    use crate::mocks::{MockHttpTransport, MockResponse};
    use parking_lot::Mutex;
    use serde_json::json;
    use std::io;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn debug_session(transport: Arc<MockHttpTransport>) -> Session {
        let config = MandrillConfigBuilder::new()
            .api_key("abcdefghijkl-secret")
            .debug(true)
            .build_unchecked();
        Session::new(
            Arc::new(config),
            AuthManager::new(ApiKey::new("abcdefghijkl-secret")),
            transport,
        )
    }

    fn capture() -> (Captured, tracing::subscriber::DefaultGuard) {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (captured, guard)
    }

    #[tokio::test]
    async fn test_debug_logging_leaves_results_untouched() {
        let (captured, _guard) = capture();
        let transport = Arc::new(MockHttpTransport::new());
        transport.enqueue(MockResponse::json(200, json!([{"email": "a@example.com"}])));
        transport.enqueue(MockResponse::api_error(500, "Invalid_Key", "Invalid API key", -1));
        let session = debug_session(transport.clone());

        let value = session.request("users/info", Params::new()).await.unwrap();
        assert_eq!(value, json!([{"email": "a@example.com"}]));

        let err = session.request("users/info", Params::new()).await.unwrap_err();
        assert!(err.is_api_kind(ApiErrorKind::KeyInvalid));

        let logs = captured.text();
        assert!(logs.contains("Call to"));
        assert!(logs.contains("Completed in"));
        assert!(!logs.contains("abcdefghijkl-secret"));
        assert_eq!(transport.recorded_requests()[0].json()["key"], "abcdefghijkl-secret");
    }

    #[tokio::test]
    async fn test_debug_logging_times_failed_calls() {
        let (captured, _guard) = capture();
        let transport = Arc::new(MockHttpTransport::new());
        transport.enqueue(MockResponse::timed_out());
        let session = debug_session(transport);

        let err = session.request("users/ping", Params::new()).await.unwrap_err();
        assert!(matches!(err, MandrillError::Network(_)));

        let logs = captured.text();
        assert!(logs.contains("Failed after"));
        assert!(logs.contains("duration_ms"));
    }
}
