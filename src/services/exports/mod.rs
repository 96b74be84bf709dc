//! Exports service for the Mandrill API.
//!
//! Export jobs run in the background; poll [`ExportsService::info`] until the
//! state is `complete` and download `result_url`.

use crate::client::Session;
use crate::errors::MandrillResult;
use crate::services::{params, to_params};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

/// Filters for an activity export
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActivityExportRequest {
    /// Address notified when the export is ready
    pub notify_email: Option<String>,
    /// Start date, `YYYY-MM-DD`
    pub date_from: Option<String>,
    /// End date, `YYYY-MM-DD`
    pub date_to: Option<String>,
    /// Only messages with one of these tags
    pub tags: Option<Vec<String>>,
    /// Only messages from one of these senders
    pub senders: Option<Vec<String>>,
    /// Only messages in one of these states
    pub states: Option<Vec<String>>,
    /// Only messages sent with one of these API keys
    pub api_keys: Option<Vec<String>>,
}

impl ActivityExportRequest {
    /// Export everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Notify an address when the export is ready
    pub fn notify_email(mut self, email: impl Into<String>) -> Self {
        self.notify_email = Some(email.into());
        self
    }

    /// Restrict to a date range
    pub fn date_range(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.date_from = Some(from.into());
        self.date_to = Some(to.into());
        self
    }

    /// Restrict to tags
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict to senders
    pub fn senders<I, S>(mut self, senders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.senders = Some(senders.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict to message states
    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states = Some(states.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict to API keys
    pub fn api_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.api_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }
}

/// Exports service implementation
#[derive(Debug, Clone)]
pub struct ExportsService {
    session: Arc<Session>,
}

impl ExportsService {
    /// Create a new exports service
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Get the state of an export job
    #[instrument(skip(self))]
    pub async fn info(&self, id: &str) -> MandrillResult<Value> {
        self.session
            .request("exports/info", params(json!({ "id": id })))
            .await
    }

    /// List export jobs
    #[instrument(skip(self))]
    pub async fn list(&self) -> MandrillResult<Value> {
        self.session.request("exports/list", params(json!({}))).await
    }

    /// Export the rejection list
    #[instrument(skip(self))]
    pub async fn rejects(&self, notify_email: Option<&str>) -> MandrillResult<Value> {
        self.session
            .request("exports/rejects", params(json!({ "notify_email": notify_email })))
            .await
    }

    /// Export the whitelist
    #[instrument(skip(self))]
    pub async fn whitelist(&self, notify_email: Option<&str>) -> MandrillResult<Value> {
        self.session
            .request("exports/whitelist", params(json!({ "notify_email": notify_email })))
            .await
    }

    /// Export message activity
    #[instrument(skip(self, request))]
    pub async fn activity(&self, request: &ActivityExportRequest) -> MandrillResult<Value> {
        self.session
            .request("exports/activity", to_params(request)?)
            .await
    }
}
