//! Tags service for the Mandrill API.

use crate::client::Session;
use crate::errors::MandrillResult;
use crate::services::params;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

/// Tags service implementation
#[derive(Debug, Clone)]
pub struct TagsService {
    session: Arc<Session>,
}

impl TagsService {
    /// Create a new tags service
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// List tags with their stats
    #[instrument(skip(self))]
    pub async fn list(&self) -> MandrillResult<Value> {
        self.session.request("tags/list", params(json!({}))).await
    }

    /// Get the stats of one tag
    #[instrument(skip(self))]
    pub async fn info(&self, tag: &str) -> MandrillResult<Value> {
        self.session
            .request("tags/info", params(json!({ "tag": tag })))
            .await
    }

    /// Hourly stats for one tag, or for all tags when `tag` is `None`
    #[instrument(skip(self))]
    pub async fn time_series(&self, tag: Option<&str>) -> MandrillResult<Value> {
        match tag {
            Some(tag) => {
                self.session
                    .request("tags/time-series", params(json!({ "tag": tag })))
                    .await
            }
            None => {
                self.session
                    .request("tags/all-time-series", params(json!({})))
                    .await
            }
        }
    }

    /// Delete a tag
    #[instrument(skip(self))]
    pub async fn delete(&self, tag: &str) -> MandrillResult<Value> {
        self.session
            .request("tags/delete", params(json!({ "tag": tag })))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::mock_session;

    #[tokio::test]
    async fn test_time_series_routing() {
        let (session, transport) = mock_session();
        let service = TagsService::new(session);

        service.time_series(Some("billing")).await.unwrap();
        service.time_series(None).await.unwrap();

        let requests = transport.recorded_requests();
        assert_eq!(requests[0].endpoint(), Some("tags/time-series"));
        assert_eq!(requests[0].json()["tag"], json!("billing"));
        assert_eq!(requests[1].endpoint(), Some("tags/all-time-series"));
    }
}
