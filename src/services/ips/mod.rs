//! Dedicated IPs service for the Mandrill API.

use crate::client::Session;
use crate::errors::MandrillResult;
use crate::services::params;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

/// Dedicated IPs service implementation
#[derive(Debug, Clone)]
pub struct IpsService {
    session: Arc<Session>,
}

impl IpsService {
    /// Create a new IPs service
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// List dedicated IPs
    #[instrument(skip(self))]
    pub async fn list(&self) -> MandrillResult<Value> {
        self.session.request("ips/list", params(json!({}))).await
    }

    /// Get a dedicated IP
    #[instrument(skip(self))]
    pub async fn info(&self, ip: &str) -> MandrillResult<Value> {
        self.session
            .request("ips/info", params(json!({ "ip": ip })))
            .await
    }

    /// Request a new dedicated IP
    #[instrument(skip(self))]
    pub async fn provision(&self, warmup: bool, pool: Option<&str>) -> MandrillResult<Value> {
        self.session
            .request("ips/provision", params(json!({ "warmup": warmup, "pool": pool })))
            .await
    }

    /// Start the warmup of an IP
    #[instrument(skip(self))]
    pub async fn start_warmup(&self, ip: &str) -> MandrillResult<Value> {
        self.session
            .request("ips/start-warmup", params(json!({ "ip": ip })))
            .await
    }

    /// Cancel the warmup of an IP
    #[instrument(skip(self))]
    pub async fn cancel_warmup(&self, ip: &str) -> MandrillResult<Value> {
        self.session
            .request("ips/cancel-warmup", params(json!({ "ip": ip })))
            .await
    }

    /// Move an IP to another pool, creating the pool if asked
    #[instrument(skip(self))]
    pub async fn set_pool(&self, ip: &str, pool: &str, create_pool: bool) -> MandrillResult<Value> {
        self.session
            .request(
                "ips/set-pool",
                params(json!({ "ip": ip, "pool": pool, "create_pool": create_pool })),
            )
            .await
    }

    /// Delete a dedicated IP
    #[instrument(skip(self))]
    pub async fn delete(&self, ip: &str) -> MandrillResult<Value> {
        self.session
            .request("ips/delete", params(json!({ "ip": ip })))
            .await
    }

    /// List IP pools
    #[instrument(skip(self))]
    pub async fn list_pools(&self) -> MandrillResult<Value> {
        self.session.request("ips/list-pools", params(json!({}))).await
    }

    /// Get an IP pool
    #[instrument(skip(self))]
    pub async fn pool_info(&self, pool: &str) -> MandrillResult<Value> {
        self.session
            .request("ips/pool-info", params(json!({ "pool": pool })))
            .await
    }

    /// Create an IP pool
    #[instrument(skip(self))]
    pub async fn create_pool(&self, pool: &str) -> MandrillResult<Value> {
        self.session
            .request("ips/create-pool", params(json!({ "pool": pool })))
            .await
    }

    /// Delete an empty IP pool
    #[instrument(skip(self))]
    pub async fn delete_pool(&self, pool: &str) -> MandrillResult<Value> {
        self.session
            .request("ips/delete-pool", params(json!({ "pool": pool })))
            .await
    }

    /// Check whether a domain can be used as an IP's reverse DNS
    #[instrument(skip(self))]
    pub async fn check_custom_dns(&self, ip: &str, domain: &str) -> MandrillResult<Value> {
        self.session
            .request(
                "ips/check-custom-dns",
                params(json!({ "ip": ip, "domain": domain })),
            )
            .await
    }

    /// Set the reverse DNS of an IP
    #[instrument(skip(self))]
    pub async fn set_custom_dns(&self, ip: &str, domain: &str) -> MandrillResult<Value> {
        self.session
            .request(
                "ips/set-custom-dns",
                params(json!({ "ip": ip, "domain": domain })),
            )
            .await
    }
}
