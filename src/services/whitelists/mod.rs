//! Whitelist service for the Mandrill API.

use crate::client::Session;
use crate::errors::MandrillResult;
use crate::models::{Address, Entity};
use crate::services::params;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

/// Whitelists service implementation
#[derive(Debug, Clone)]
pub struct WhitelistsService {
    session: Arc<Session>,
}

impl WhitelistsService {
    /// Create a new whitelists service
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Whitelist an address
    #[instrument(skip(self, address))]
    pub async fn add(&self, address: &Address) -> MandrillResult<Value> {
        self.session.request("whitelists/add", address.fields()).await
    }

    /// List whitelisted addresses, optionally matching a prefix
    #[instrument(skip(self))]
    pub async fn list(&self, email: Option<&str>) -> MandrillResult<Value> {
        self.session
            .request("whitelists/list", params(json!({ "email": email })))
            .await
    }

    /// Remove an address from the whitelist
    #[instrument(skip(self))]
    pub async fn delete(&self, email: &str) -> MandrillResult<Value> {
        self.session
            .request("whitelists/delete", params(json!({ "email": email })))
            .await
    }
}
