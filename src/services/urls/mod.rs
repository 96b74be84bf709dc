//! URLs service for the Mandrill API.

use crate::client::Session;
use crate::errors::MandrillResult;
use crate::services::params;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

/// URLs service implementation
#[derive(Debug, Clone)]
pub struct UrlsService {
    session: Arc<Session>,
}

impl UrlsService {
    /// Create a new URLs service
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// The most clicked tracked URLs
    #[instrument(skip(self))]
    pub async fn list(&self) -> MandrillResult<Value> {
        self.session.request("urls/list", params(json!({}))).await
    }

    /// Search tracked URLs
    #[instrument(skip(self))]
    pub async fn search(&self, q: &str) -> MandrillResult<Value> {
        self.session
            .request("urls/search", params(json!({ "q": q })))
            .await
    }

    /// Hourly stats for one tracked URL
    #[instrument(skip(self))]
    pub async fn time_series(&self, url: &str) -> MandrillResult<Value> {
        self.session
            .request("urls/time-series", params(json!({ "url": url })))
            .await
    }

    /// List tracking domains
    #[instrument(skip(self))]
    pub async fn tracking_domains(&self) -> MandrillResult<Value> {
        self.session
            .request("urls/tracking-domains", params(json!({})))
            .await
    }

    /// Add a tracking domain
    #[instrument(skip(self))]
    pub async fn add_tracking_domain(&self, domain: &str) -> MandrillResult<Value> {
        self.session
            .request("urls/add-tracking-domain", params(json!({ "domain": domain })))
            .await
    }

    /// Check the CNAME setup of a tracking domain
    #[instrument(skip(self))]
    pub async fn check_tracking_domain(&self, domain: &str) -> MandrillResult<Value> {
        self.session
            .request("urls/check-tracking-domain", params(json!({ "domain": domain })))
            .await
    }
}
