//! Templates service for the Mandrill API.

use crate::client::Session;
use crate::errors::MandrillResult;
use crate::models::{Entity, Template};
use crate::services::params;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

/// Templates service implementation
#[derive(Debug, Clone)]
pub struct TemplatesService {
    session: Arc<Session>,
}

impl TemplatesService {
    /// Create a new templates service
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Add a template
    #[instrument(skip(self, template), fields(name = ?template.name()))]
    pub async fn add(&self, template: &Template) -> MandrillResult<Value> {
        self.session.request("templates/add", template.fields()).await
    }

    /// Get a template
    #[instrument(skip(self))]
    pub async fn info(&self, name: &str) -> MandrillResult<Value> {
        self.session
            .request("templates/info", params(json!({ "name": name })))
            .await
    }

    /// Update a template
    #[instrument(skip(self, template), fields(name = ?template.name()))]
    pub async fn update(&self, template: &Template) -> MandrillResult<Value> {
        self.session
            .request("templates/update", template.fields())
            .await
    }

    /// Publish the draft of a template
    #[instrument(skip(self))]
    pub async fn publish(&self, name: &str) -> MandrillResult<Value> {
        self.session
            .request("templates/publish", params(json!({ "name": name })))
            .await
    }

    /// Delete a template
    #[instrument(skip(self))]
    pub async fn delete(&self, name: &str) -> MandrillResult<Value> {
        self.session
            .request("templates/delete", params(json!({ "name": name })))
            .await
    }

    /// List templates, optionally only those with a label
    #[instrument(skip(self))]
    pub async fn list(&self, label: Option<&str>) -> MandrillResult<Value> {
        self.session
            .request("templates/list", params(json!({ "label": label })))
            .await
    }

    /// Hourly stats for messages sent with a template
    #[instrument(skip(self))]
    pub async fn time_series(&self, name: &str) -> MandrillResult<Value> {
        self.session
            .request("templates/time-series", params(json!({ "name": name })))
            .await
    }

    /// Render a template with its content and merge variables
    #[instrument(skip(self, template), fields(name = ?template.name()))]
    pub async fn render(&self, template: &Template) -> MandrillResult<Value> {
        self.session
            .request(
                "templates/render",
                params(json!({
                    "template_name": template.name(),
                    "template_content": template.content(),
                    "merge_vars": template.merge_vars(),
                })),
            )
            .await
    }
}
