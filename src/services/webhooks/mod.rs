//! Webhooks service for the Mandrill API.

use crate::client::Session;
use crate::errors::MandrillResult;
use crate::models::{Entity, Webhook};
use crate::services::params;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

/// Webhooks service implementation
#[derive(Debug, Clone)]
pub struct WebhooksService {
    session: Arc<Session>,
}

impl WebhooksService {
    /// Create a new webhooks service
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// List webhooks
    #[instrument(skip(self))]
    pub async fn list(&self) -> MandrillResult<Value> {
        self.session.request("webhooks/list", params(json!({}))).await
    }

    /// Add a webhook
    #[instrument(skip(self, webhook))]
    pub async fn add(&self, webhook: &Webhook) -> MandrillResult<Value> {
        self.session.request("webhooks/add", webhook.fields()).await
    }

    /// Get a webhook
    #[instrument(skip(self))]
    pub async fn info(&self, id: &str) -> MandrillResult<Value> {
        self.session
            .request("webhooks/info", params(json!({ "id": id })))
            .await
    }

    /// Update a webhook; `id` must be set
    #[instrument(skip(self, webhook))]
    pub async fn update(&self, webhook: &Webhook) -> MandrillResult<Value> {
        self.session.request("webhooks/update", webhook.fields()).await
    }

    /// Delete a webhook
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> MandrillResult<Value> {
        self.session
            .request("webhooks/delete", params(json!({ "id": id })))
            .await
    }
}
