//! Account level records: addresses, webhooks, subaccounts, exports and metadata fields.

use super::entity::entity;
use super::Entity;
use crate::errors::MandrillResult;
use crate::types::{ExportState, ExportType, MetadataState};
use serde::de::DeserializeOwned;
use serde_json::Value;

entity! {
    /// Email address entry for the rejection and whitelist lists
    Address => Address
}

impl Address {
    /// Create an entry for an email address
    pub fn email(email: impl Into<String>) -> Self {
        let mut address = Self::new();
        address
            .data
            .insert("email".to_string(), Value::String(email.into()));
        address
    }
}

entity! {
    /// Webhook receiving event notifications
    Webhook => Webhook
}

impl Webhook {
    /// Create a webhook posting to `url`
    pub fn with_url(url: impl Into<String>) -> Self {
        let mut webhook = Self::new();
        webhook
            .data
            .insert("url".to_string(), Value::String(url.into()));
        webhook
    }

    /// Subscribe to an event (`send`, `open`, `click`, ...)
    pub fn add_event(&mut self, name: &str) -> MandrillResult<()> {
        self.append_to_list("events", Value::String(name.to_string()))
    }
}

entity! {
    /// Subaccount
    Subaccount => Subaccount
}

entity! {
    /// Export job
    Export => Export
}

impl Export {
    /// Kind of export, when known
    pub fn export_type(&self) -> Option<ExportType> {
        typed(self.data.get("type"))
    }

    /// Job state, when known
    pub fn state(&self) -> Option<ExportState> {
        typed(self.data.get("state"))
    }
}

entity! {
    /// Custom metadata field
    Metadata => Metadata
}

impl Metadata {
    /// Create a field definition
    pub fn named(name: impl Into<String>) -> Self {
        let mut metadata = Self::new();
        metadata
            .data
            .insert("name".to_string(), Value::String(name.into()));
        metadata
    }

    /// Indexing state, when known
    pub fn state(&self) -> Option<MetadataState> {
        typed(self.data.get("state"))
    }
}

fn typed<T: DeserializeOwned>(value: Option<&Value>) -> Option<T> {
    value.and_then(|v| serde_json::from_value(v.clone()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_webhook_events() {
        let mut webhook = Webhook::with_url("https://example.com/hook");
        webhook.add_event("send").unwrap();
        webhook.add_event("open").unwrap();
        assert_eq!(webhook.get("events").unwrap(), Some(&json!(["send", "open"])));
    }

    #[test]
    fn test_export_state_from_info() {
        let raw = json!({
            "id": "2013-01-01 12:20:28.13842",
            "type": "activity",
            "state": "complete",
            "result_url": "https://example.com/export.zip"
        });
        let export = Export::from_fields(raw.as_object().unwrap().clone());
        assert_eq!(export.export_type(), Some(ExportType::Activity));
        assert_eq!(export.state(), Some(ExportState::Complete));

        let mut metadata = Metadata::named("group_id");
        assert_eq!(metadata.state(), None);
        metadata.set("state", json!("index")).unwrap();
        assert_eq!(metadata.state(), Some(MetadataState::Index));
    }

    #[test]
    fn test_subaccount_quota_coerced() {
        let raw = json!({"id": 12, "custom_quota": "500", "reputation": 80});
        let subaccount = Subaccount::from_fields(raw.as_object().unwrap().clone());
        assert_eq!(subaccount.get("id").unwrap(), Some(&json!("12")));
        assert_eq!(subaccount.get("custom_quota").unwrap(), Some(&json!(500)));
        assert_eq!(subaccount.fields().len(), 2);
    }
}
