//! Subaccounts service for the Mandrill API.

use crate::client::Session;
use crate::errors::MandrillResult;
use crate::models::{Entity, Subaccount};
use crate::services::params;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

/// Subaccounts service implementation
#[derive(Debug, Clone)]
pub struct SubaccountsService {
    session: Arc<Session>,
}

impl SubaccountsService {
    /// Create a new subaccounts service
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// List subaccounts, optionally filtered by an id or name prefix
    #[instrument(skip(self))]
    pub async fn list(&self, q: Option<&str>) -> MandrillResult<Value> {
        self.session
            .request("subaccounts/list", params(json!({ "q": q })))
            .await
    }

    /// Add a subaccount
    #[instrument(skip(self, subaccount))]
    pub async fn add(&self, subaccount: &Subaccount) -> MandrillResult<Value> {
        self.session
            .request("subaccounts/add", subaccount.fields())
            .await
    }

    /// Get a subaccount
    #[instrument(skip(self))]
    pub async fn info(&self, id: &str) -> MandrillResult<Value> {
        self.session
            .request("subaccounts/info", params(json!({ "id": id })))
            .await
    }

    /// Update a subaccount
    #[instrument(skip(self, subaccount))]
    pub async fn update(&self, subaccount: &Subaccount) -> MandrillResult<Value> {
        self.session
            .request("subaccounts/update", subaccount.fields())
            .await
    }

    /// Delete a subaccount
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> MandrillResult<Value> {
        self.session
            .request("subaccounts/delete", params(json!({ "id": id })))
            .await
    }

    /// Pause sending for a subaccount
    #[instrument(skip(self))]
    pub async fn pause(&self, id: &str) -> MandrillResult<Value> {
        self.session
            .request("subaccounts/pause", params(json!({ "id": id })))
            .await
    }

    /// Resume sending for a subaccount
    #[instrument(skip(self))]
    pub async fn resume(&self, id: &str) -> MandrillResult<Value> {
        self.session
            .request("subaccounts/resume", params(json!({ "id": id })))
            .await
    }
}
