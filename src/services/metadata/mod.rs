//! Custom metadata fields service for the Mandrill API.

use crate::client::Session;
use crate::errors::MandrillResult;
use crate::models::{Entity, Metadata};
use crate::services::params;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

/// Metadata service implementation
#[derive(Debug, Clone)]
pub struct MetadataService {
    session: Arc<Session>,
}

impl MetadataService {
    /// Create a new metadata service
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// List custom metadata fields
    #[instrument(skip(self))]
    pub async fn list(&self) -> MandrillResult<Value> {
        self.session.request("metadata/list", params(json!({}))).await
    }

    /// Add a metadata field
    #[instrument(skip(self, metadata))]
    pub async fn add(&self, metadata: &Metadata) -> MandrillResult<Value> {
        self.session.request("metadata/add", metadata.fields()).await
    }

    /// Update the view template of a metadata field
    #[instrument(skip(self, metadata))]
    pub async fn update(&self, metadata: &Metadata) -> MandrillResult<Value> {
        self.session
            .request("metadata/update", metadata.fields())
            .await
    }

    /// Delete a metadata field
    #[instrument(skip(self))]
    pub async fn delete(&self, name: &str) -> MandrillResult<Value> {
        self.session
            .request("metadata/delete", params(json!({ "name": name })))
            .await
    }
}
