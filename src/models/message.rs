//! Outgoing messages.

use super::recipient::insert_keyed;
use super::{Entity, EntityKind, Media, Recipient, Template};
use crate::errors::MandrillResult;
use crate::types::Params;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

/// Format of `send_at` timestamps, always UTC
pub const SEND_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Options of a send call that are not part of the message itself
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendOptions {
    /// Queue the message and return immediately
    pub send_async: bool,
    /// Dedicated IP pool to send from
    pub ip_pool: Option<String>,
    /// Schedule delivery
    pub send_at: Option<DateTime<Utc>>,
}

impl SendOptions {
    /// Default options: synchronous, default pool, send now
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the message instead of sending synchronously
    pub fn send_async(mut self, send_async: bool) -> Self {
        self.send_async = send_async;
        self
    }

    /// Send from a dedicated IP pool
    pub fn ip_pool(mut self, pool: impl Into<String>) -> Self {
        self.ip_pool = Some(pool.into());
        self
    }

    /// Schedule delivery
    pub fn send_at(mut self, at: DateTime<Utc>) -> Self {
        self.send_at = Some(at);
        self
    }

    /// Request parameters; unset options are sent as `null`
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("async".to_string(), Value::Bool(self.send_async));
        params.insert(
            "ip_pool".to_string(),
            self.ip_pool.clone().map(Value::String).unwrap_or(Value::Null),
        );
        params.insert("send_at".to_string(), format_send_at(self.send_at.as_ref()));
        params
    }
}

/// Format an optional timestamp the way the API expects, `null` when absent
pub fn format_send_at(at: Option<&DateTime<Utc>>) -> Value {
    at.map(|t| Value::String(t.format(SEND_AT_FORMAT).to_string()))
        .unwrap_or(Value::Null)
}

/// An outgoing message
///
/// Recipients, attachments and templates are copied in when added; later
/// changes to the originals are not reflected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    data: Params,
    send_options: Option<SendOptions>,
    template: Option<Template>,
}

impl Message {
    /// Create an empty message
    pub fn new() -> Self {
        Self::default()
    }

    /// Send options used by a plain send
    pub fn set_send_options(&mut self, options: SendOptions) {
        self.send_options = Some(options);
    }

    /// Send options, when set
    pub fn send_options(&self) -> Option<&SendOptions> {
        self.send_options.as_ref()
    }

    /// Send through a stored template
    pub fn set_template(&mut self, template: Template) {
        self.template = Some(template);
    }

    /// Template, when set
    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    /// Whether a template is set
    pub fn has_template(&self) -> bool {
        self.template.is_some()
    }

    /// Whether a non-empty raw MIME message is set
    pub fn has_raw_message(&self) -> bool {
        self.raw_message().map(|m| !m.is_empty()).unwrap_or(false)
    }

    /// Raw MIME message, when set
    pub fn raw_message(&self) -> Option<&str> {
        self.get_str("raw_message")
    }

    /// Add a tag
    pub fn add_tag(&mut self, tag: &str) -> MandrillResult<()> {
        self.append_to_list("tags", Value::String(tag.to_string()))
    }

    /// Add a domain whose links get Google Analytics parameters
    pub fn add_google_analytics_domain(&mut self, domain: &str) -> MandrillResult<()> {
        self.append_to_list("google_analytics_domains", Value::String(domain.to_string()))
    }

    /// Add an extra header
    pub fn add_header(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> MandrillResult<()> {
        insert_keyed(self, "headers", name.into(), Value::String(value.into()))
    }

    /// Add message level metadata
    pub fn add_metadata(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> MandrillResult<()> {
        insert_keyed(self, "metadata", name.into(), value.into())
    }

    /// Add a merge variable shared by all recipients
    pub fn add_global_merge_var(&mut self, name: &str, content: impl Into<Value>) -> MandrillResult<()> {
        let content: Value = content.into();
        self.append_to_list("global_merge_vars", json!({"name": name, "content": content}))
    }

    /// Add a recipient
    ///
    /// Appends the recipient's email, name and type to `to`. Its metadata and
    /// merge variables, when present, go to `recipient_metadata` and
    /// `merge_vars` keyed by the recipient's email.
    pub fn add_recipient(&mut self, recipient: &Recipient) -> MandrillResult<()> {
        self.append_to_list("to", Value::Object(recipient.fields()))?;

        let rcpt = recipient
            .email()
            .map(|e| Value::String(e.to_string()))
            .unwrap_or(Value::Null);

        if let Some(metadata) = recipient.metadata() {
            self.append_to_list(
                "recipient_metadata",
                json!({"rcpt": rcpt.clone(), "values": metadata}),
            )?;
        }

        if let Some(merge_vars) = recipient.merge_vars() {
            let vars: Vec<Value> = merge_vars
                .iter()
                .map(|(name, content)| json!({"name": name, "content": content}))
                .collect();
            self.append_to_list("merge_vars", json!({"rcpt": rcpt, "vars": vars}))?;
        }

        Ok(())
    }

    /// Attach a file; media without content is skipped
    pub fn add_attachment(&mut self, media: &Media) -> MandrillResult<()> {
        if media.is_valid() {
            self.append_to_list("attachments", Value::Object(media.fields()))?;
        }
        Ok(())
    }

    /// Embed an inline image; media without content or of a non-image type is skipped
    pub fn add_image(&mut self, media: &Media) -> MandrillResult<()> {
        if media.is_valid() && media.is_image() {
            self.append_to_list("images", Value::Object(media.fields()))?;
        }
        Ok(())
    }

    /// Whether any recipient was added
    pub fn has_recipients(&self) -> bool {
        self.data
            .get("to")
            .and_then(Value::as_array)
            .map_or(false, |list| !list.is_empty())
    }

    /// Addresses of the recipients typed `to`, in order
    ///
    /// Recipients without a type are not included.
    pub fn to_addresses(&self) -> Vec<String> {
        self.data
            .get("to")
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter(|r| r.get("type").and_then(Value::as_str) == Some("to"))
                    .filter_map(|r| r.get("email").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Entity for Message {
    const KIND: EntityKind = EntityKind::Message;

    fn from_data(data: Params) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    fn data(&self) -> &Params {
        &self.data
    }

    fn data_mut(&mut self) -> &mut Params {
        &mut self.data
    }
}
