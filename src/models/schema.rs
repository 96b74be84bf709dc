//! Field schemas for each entity kind.
//!
//! The tables mirror the parameter tables of the remote API. They are not
//! complete: bulk ingestion drops anything not listed here.

use crate::types::FieldType;
use FieldType::{Boolean as B, Integer as I, List as L, Map as M, String as S};

/// Field name and declared type
pub type Schema = &'static [(&'static str, FieldType)];

/// Kinds of request entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Outgoing message
    Message,
    /// Message recipient
    Recipient,
    /// Attachment or inline image
    Media,
    /// Stored template
    Template,
    /// Message search query
    MessageQuery,
    /// Email address entry for rejection and whitelists
    Address,
    /// Webhook
    Webhook,
    /// Subaccount
    Subaccount,
    /// Export job
    Export,
    /// Custom metadata field
    Metadata,
}

impl EntityKind {
    /// All entity kinds
    pub const ALL: [EntityKind; 10] = [
        EntityKind::Message,
        EntityKind::Recipient,
        EntityKind::Media,
        EntityKind::Template,
        EntityKind::MessageQuery,
        EntityKind::Address,
        EntityKind::Webhook,
        EntityKind::Subaccount,
        EntityKind::Export,
        EntityKind::Metadata,
    ];

    /// Kind name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Message => "message",
            EntityKind::Recipient => "recipient",
            EntityKind::Media => "media",
            EntityKind::Template => "template",
            EntityKind::MessageQuery => "messageQuery",
            EntityKind::Address => "address",
            EntityKind::Webhook => "webhook",
            EntityKind::Subaccount => "subaccount",
            EntityKind::Export => "export",
            EntityKind::Metadata => "metadata",
        }
    }

    /// Schema table for the kind
    pub fn schema(&self) -> Schema {
        match self {
            EntityKind::Message => MESSAGE,
            EntityKind::Recipient => RECIPIENT,
            EntityKind::Media => MEDIA,
            EntityKind::Template => TEMPLATE,
            EntityKind::MessageQuery => MESSAGE_QUERY,
            EntityKind::Address => ADDRESS,
            EntityKind::Webhook => WEBHOOK,
            EntityKind::Subaccount => SUBACCOUNT,
            EntityKind::Export => EXPORT,
            EntityKind::Metadata => METADATA,
        }
    }

    /// Declared type of a field, if the field is part of the schema
    pub fn field_type(&self, field: &str) -> Option<FieldType> {
        self.schema()
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, ty)| *ty)
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

const MESSAGE: Schema = &[
    ("html", S),
    ("text", S),
    ("subject", S),
    ("from_email", S),
    ("from_name", S),
    ("to", L),
    ("headers", M),
    ("important", B),
    ("track_opens", B),
    ("track_clicks", B),
    ("auto_text", B),
    ("auto_html", B),
    ("inline_css", B),
    ("url_strip_qs", B),
    ("preserve_recipients", B),
    ("view_content_link", B),
    ("bcc_address", S),
    ("tracking_domain", S),
    ("signing_domain", S),
    ("return_path_domain", S),
    ("merge", B),
    ("merge_language", S),
    ("global_merge_vars", L),
    ("merge_vars", L),
    ("tags", L),
    ("subaccount", S),
    ("google_analytics_domains", L),
    ("google_analytics_campaign", S),
    ("metadata", M),
    ("recipient_metadata", L),
    ("attachments", L),
    ("images", L),
    ("raw_message", S),
];

const RECIPIENT: Schema = &[
    ("email", S),
    ("name", S),
    ("type", S),
    ("metadata", M),
    ("merge_vars", M),
];

const MEDIA: Schema = &[("type", S), ("name", S), ("content", S)];

const TEMPLATE: Schema = &[
    ("name", S),
    ("content", L),
    ("from_email", S),
    ("from_name", S),
    ("subject", S),
    ("code", S),
    ("text", S),
    ("publish", B),
    ("labels", L),
    ("merge_vars", L),
];

const MESSAGE_QUERY: Schema = &[
    ("query", S),
    ("date_from", S),
    ("date_to", S),
    ("tags", L),
    ("senders", L),
    ("api_keys", L),
    ("limit", I),
];

const ADDRESS: Schema = &[("email", S), ("comment", S), ("subaccount", S)];

const WEBHOOK: Schema = &[
    ("id", S),
    ("url", S),
    ("description", S),
    ("events", L),
];

const SUBACCOUNT: Schema = &[
    ("id", S),
    ("name", S),
    ("notes", S),
    ("custom_quota", I),
];

const EXPORT: Schema = &[
    ("id", S),
    ("type", S),
    ("state", S),
    ("result_url", S),
    ("finished_at", S),
    ("created_at", S),
];

const METADATA: Schema = &[("name", S), ("state", S), ("view_template", S)];
