//! Messages service implementation.

use crate::client::Session;
use crate::errors::MandrillResult;
use crate::models::{format_send_at, Entity, Message, MessageQuery, SendOptions};
use crate::services::params;
use crate::types::Params;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

/// Messages service implementation
#[derive(Debug, Clone)]
pub struct MessagesService {
    session: Arc<Session>,
}

impl MessagesService {
    /// Create a new messages service
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Send a message with its own send options, or the defaults
    ///
    /// Routes to `messages/send-template` when a template is set, to
    /// `messages/send-raw` when a raw message is set, else `messages/send`.
    /// Returns one result per recipient.
    #[instrument(skip(self, message))]
    pub async fn send(&self, message: &Message) -> MandrillResult<Value> {
        let options = message.send_options().cloned().unwrap_or_default();
        self.send_with_options(message, &options).await
    }

    /// Send a message with explicit send options
    #[instrument(skip(self, message, options))]
    pub async fn send_with_options(
        &self,
        message: &Message,
        options: &SendOptions,
    ) -> MandrillResult<Value> {
        let (endpoint, params) = build_send(message, options);
        self.session.request(endpoint, params).await
    }

    /// Search sent messages, or their hourly stats when the query uses time series
    #[instrument(skip(self, query))]
    pub async fn search(&self, query: &MessageQuery) -> MandrillResult<Value> {
        let endpoint = if query.is_time_series() {
            "messages/search-time-series"
        } else {
            "messages/search"
        };
        self.session.request(endpoint, query.fields()).await
    }

    /// Get the details of a sent message
    #[instrument(skip(self))]
    pub async fn info(&self, id: &str) -> MandrillResult<Value> {
        self.session
            .request("messages/info", params(json!({ "id": id })))
            .await
    }

    /// Get the full content of a recently sent message
    #[instrument(skip(self))]
    pub async fn content(&self, id: &str) -> MandrillResult<Value> {
        self.session
            .request("messages/content", params(json!({ "id": id })))
            .await
    }

    /// Parse a raw MIME document into its components
    #[instrument(skip(self, raw_message))]
    pub async fn parse(&self, raw_message: &str) -> MandrillResult<Value> {
        self.session
            .request("messages/parse", params(json!({ "raw_message": raw_message })))
            .await
    }

    /// List scheduled messages, optionally only those to one recipient
    #[instrument(skip(self))]
    pub async fn list_scheduled(&self, to: Option<&str>) -> MandrillResult<Value> {
        self.session
            .request("messages/list-scheduled", params(json!({ "to": to })))
            .await
    }

    /// Cancel a scheduled message
    #[instrument(skip(self))]
    pub async fn cancel_scheduled(&self, id: &str) -> MandrillResult<Value> {
        self.session
            .request("messages/cancel-scheduled", params(json!({ "id": id })))
            .await
    }

    /// Move a scheduled message to a new time
    #[instrument(skip(self))]
    pub async fn reschedule(&self, id: &str, send_at: DateTime<Utc>) -> MandrillResult<Value> {
        let send_at = format_send_at(Some(&send_at));
        self.session
            .request(
                "messages/reschedule",
                params(json!({ "id": id, "send_at": send_at })),
            )
            .await
    }
}

/// Endpoint and parameters of a send call
pub fn build_send(message: &Message, options: &SendOptions) -> (&'static str, Params) {
    let mut params = Params::new();
    let endpoint = if let Some(template) = message.template() {
        params.insert(
            "template_name".to_string(),
            template
                .name()
                .map(|n| Value::String(n.to_string()))
                .unwrap_or(Value::Null),
        );
        params.insert("template_content".to_string(), template.content());
        params.insert("message".to_string(), Value::Object(message.fields()));
        "messages/send-template"
    } else if message.has_raw_message() {
        let field = |name: &str| message.data().get(name).cloned().unwrap_or(Value::Null);
        params.insert("raw_message".to_string(), field("raw_message"));
        params.insert("from_email".to_string(), field("from_email"));
        params.insert("from_name".to_string(), field("from_name"));
        if message.has_recipients() {
            params.insert("to".to_string(), json!(message.to_addresses()));
        }
        "messages/send-raw"
    } else {
        params.insert("message".to_string(), Value::Object(message.fields()));
        "messages/send"
    };

    params.extend(options.to_params());
    (endpoint, params)
}
