//! Senders service for the Mandrill API.

use crate::client::Session;
use crate::errors::MandrillResult;
use crate::services::params;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

/// Senders service implementation
#[derive(Debug, Clone)]
pub struct SendersService {
    session: Arc<Session>,
}

impl SendersService {
    /// Create a new senders service
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Senders that have tried to use this account
    #[instrument(skip(self))]
    pub async fn list(&self) -> MandrillResult<Value> {
        self.session.request("senders/list", params(json!({}))).await
    }

    /// Sending domains
    #[instrument(skip(self))]
    pub async fn domains(&self) -> MandrillResult<Value> {
        self.session.request("senders/domains", params(json!({}))).await
    }

    /// Add a sending domain
    #[instrument(skip(self))]
    pub async fn add_domain(&self, domain: &str) -> MandrillResult<Value> {
        self.session
            .request("senders/add-domain", params(json!({ "domain": domain })))
            .await
    }

    /// Check the SPF and DKIM setup of a sending domain
    #[instrument(skip(self))]
    pub async fn check_domain(&self, domain: &str) -> MandrillResult<Value> {
        self.session
            .request("senders/check-domain", params(json!({ "domain": domain })))
            .await
    }

    /// Send a verification email to `mailbox@domain`
    #[instrument(skip(self))]
    pub async fn verify_domain(&self, domain: &str, mailbox: &str) -> MandrillResult<Value> {
        self.session
            .request(
                "senders/verify-domain",
                params(json!({ "domain": domain, "mailbox": mailbox })),
            )
            .await
    }

    /// Stats for one sender address
    #[instrument(skip(self))]
    pub async fn info(&self, address: &str) -> MandrillResult<Value> {
        self.session
            .request("senders/info", params(json!({ "address": address })))
            .await
    }

    /// Hourly stats for one sender address
    #[instrument(skip(self))]
    pub async fn time_series(&self, address: &str) -> MandrillResult<Value> {
        self.session
            .request("senders/time-series", params(json!({ "address": address })))
            .await
    }
}
