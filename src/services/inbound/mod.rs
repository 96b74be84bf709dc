//! Inbound service for the Mandrill API.
//!
//! Inbound domains receive mail; routes forward messages matching a mailbox
//! pattern to a webhook URL.

use crate::client::Session;
use crate::errors::MandrillResult;
use crate::services::{params, to_params};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

/// A raw message injected as if it had been received over SMTP
#[derive(Debug, Clone, Serialize)]
pub struct InboundRawRequest {
    /// Full MIME document
    pub raw_message: String,
    /// Envelope recipients; headers are used when absent
    pub to: Option<Vec<String>>,
    /// Envelope sender
    pub mail_from: Option<String>,
    /// SMTP HELO
    pub helo: Option<String>,
    /// Remote MTA address
    pub client_address: Option<String>,
}

impl InboundRawRequest {
    /// Create a request for a MIME document
    pub fn new(raw_message: impl Into<String>) -> Self {
        Self {
            raw_message: raw_message.into(),
            to: None,
            mail_from: None,
            helo: None,
            client_address: None,
        }
    }

    /// Set the envelope recipients
    pub fn to<I, S>(mut self, to: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.to = Some(to.into_iter().map(Into::into).collect());
        self
    }

    /// Set the envelope sender
    pub fn mail_from(mut self, mail_from: impl Into<String>) -> Self {
        self.mail_from = Some(mail_from.into());
        self
    }
}

/// Inbound service implementation
#[derive(Debug, Clone)]
pub struct InboundService {
    session: Arc<Session>,
}

impl InboundService {
    /// Create a new inbound service
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// List inbound domains
    #[instrument(skip(self))]
    pub async fn domains(&self) -> MandrillResult<Value> {
        self.session.request("inbound/domains", params(json!({}))).await
    }

    /// Add an inbound domain
    #[instrument(skip(self))]
    pub async fn add_domain(&self, domain: &str) -> MandrillResult<Value> {
        self.session
            .request("inbound/add-domain", params(json!({ "domain": domain })))
            .await
    }

    /// Check the MX setup of an inbound domain
    #[instrument(skip(self))]
    pub async fn check_domain(&self, domain: &str) -> MandrillResult<Value> {
        self.session
            .request("inbound/check-domain", params(json!({ "domain": domain })))
            .await
    }

    /// Delete an inbound domain and its routes
    #[instrument(skip(self))]
    pub async fn delete_domain(&self, domain: &str) -> MandrillResult<Value> {
        self.session
            .request("inbound/delete-domain", params(json!({ "domain": domain })))
            .await
    }

    /// List the routes of a domain
    #[instrument(skip(self))]
    pub async fn routes(&self, domain: &str) -> MandrillResult<Value> {
        self.session
            .request("inbound/routes", params(json!({ "domain": domain })))
            .await
    }

    /// Add a route
    #[instrument(skip(self))]
    pub async fn add_route(&self, domain: &str, pattern: &str, url: &str) -> MandrillResult<Value> {
        self.session
            .request(
                "inbound/add-route",
                params(json!({ "domain": domain, "pattern": pattern, "url": url })),
            )
            .await
    }

    /// Change the pattern or URL of a route
    #[instrument(skip(self))]
    pub async fn update_route(
        &self,
        id: &str,
        pattern: Option<&str>,
        url: Option<&str>,
    ) -> MandrillResult<Value> {
        self.session
            .request(
                "inbound/update-route",
                params(json!({ "id": id, "pattern": pattern, "url": url })),
            )
            .await
    }

    /// Delete a route
    #[instrument(skip(self))]
    pub async fn delete_route(&self, id: &str) -> MandrillResult<Value> {
        self.session
            .request("inbound/delete-route", params(json!({ "id": id })))
            .await
    }

    /// Inject a raw message into the inbound pipeline
    #[instrument(skip(self, request))]
    pub async fn send_raw(&self, request: &InboundRawRequest) -> MandrillResult<Value> {
        self.session
            .request("inbound/send-raw", to_params(request)?)
            .await
    }
}
