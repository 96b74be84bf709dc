//! Message recipient.

use super::{Entity, EntityKind};
use crate::errors::{MandrillResult, ModelError};
use crate::types::{Params, RecipientType};
use serde_json::Value;

/// Fields embedded into a message's `to` list
const EMBEDDED_FIELDS: [&str; 3] = ["email", "name", "type"];

/// A recipient of a message
///
/// `metadata` and `merge_vars` are kept on the recipient and copied into the
/// message's `recipient_metadata` and `merge_vars` lists when the recipient is
/// added; only `email`, `name` and `type` appear in [`Entity::fields`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recipient {
    data: Params,
}

impl Recipient {
    /// Create an empty recipient
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `to` recipient
    pub fn to(email: impl Into<String>, name: Option<&str>) -> Self {
        Self::with_type(email, name, RecipientType::To)
    }

    /// Create a recipient of the given type
    pub fn with_type(email: impl Into<String>, name: Option<&str>, kind: RecipientType) -> Self {
        let mut recipient = Self::new();
        recipient
            .data
            .insert("email".to_string(), Value::String(email.into()));
        if let Some(name) = name {
            recipient
                .data
                .insert("name".to_string(), Value::String(name.to_string()));
        }
        recipient.set_type(kind);
        recipient
    }

    /// Set the header type
    pub fn set_type(&mut self, kind: RecipientType) {
        self.data
            .insert("type".to_string(), Value::String(kind.as_str().to_string()));
    }

    /// Make this a `to` recipient
    pub fn set_type_to(&mut self) {
        self.set_type(RecipientType::To);
    }

    /// Make this a `cc` recipient
    pub fn set_type_cc(&mut self) {
        self.set_type(RecipientType::Cc);
    }

    /// Make this a `bcc` recipient
    pub fn set_type_bcc(&mut self) {
        self.set_type(RecipientType::Bcc);
    }

    /// Email address
    pub fn email(&self) -> Option<&str> {
        self.get_str("email")
    }

    /// Header type, when set
    pub fn recipient_type(&self) -> Option<&str> {
        self.get_str("type")
    }

    /// Attach a per-recipient metadata value
    pub fn add_metadata(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> MandrillResult<()> {
        insert_keyed(self, "metadata", name.into(), value.into())
    }

    /// Attach a per-recipient merge variable
    pub fn add_merge_var(
        &mut self,
        name: impl Into<String>,
        content: impl Into<Value>,
    ) -> MandrillResult<()> {
        insert_keyed(self, "merge_vars", name.into(), content.into())
    }

    /// Per-recipient metadata, when set and non-empty
    pub fn metadata(&self) -> Option<&Params> {
        non_empty_map(self.data.get("metadata"))
    }

    /// Per-recipient merge variables, when set and non-empty
    pub fn merge_vars(&self) -> Option<&Params> {
        non_empty_map(self.data.get("merge_vars"))
    }
}

impl Entity for Recipient {
    const KIND: EntityKind = EntityKind::Recipient;

    fn from_data(data: Params) -> Self {
        Self { data }
    }

    fn data(&self) -> &Params {
        &self.data
    }

    fn data_mut(&mut self) -> &mut Params {
        &mut self.data
    }

    fn fields(&self) -> Params {
        EMBEDDED_FIELDS
            .iter()
            .filter_map(|field| {
                self.data
                    .get(*field)
                    .filter(|v| !v.is_null())
                    .map(|v| (field.to_string(), v.clone()))
            })
            .collect()
    }
}

/// Insert `key: value` into a map field, creating the map on first use
pub(crate) fn insert_keyed<E: Entity>(
    entity: &mut E,
    field: &str,
    key: String,
    value: Value,
) -> MandrillResult<()> {
    let slot = entity
        .data_mut()
        .entry(field.to_string())
        .or_insert_with(|| Value::Object(Params::new()));

    match slot {
        Value::Object(map) => {
            map.insert(key, value);
            Ok(())
        }
        _ => Err(ModelError::NotAMap {
            entity: E::KIND.name(),
            field: field.to_string(),
        }
        .into()),
    }
}

fn non_empty_map(value: Option<&Value>) -> Option<&Params> {
    value.and_then(Value::as_object).filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fields_are_restricted() {
        let mut recipient = Recipient::to("a@example.com", Some("A"));
        recipient.add_metadata("user_id", 7).unwrap();
        recipient.add_merge_var("FNAME", "A").unwrap();

        let fields = recipient.fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields["email"], "a@example.com");
        assert_eq!(fields["type"], "to");
        assert!(fields.get("metadata").is_none());
        assert_eq!(recipient.metadata().unwrap()["user_id"], json!(7));
    }

    #[test]
    fn test_set_type() {
        let mut recipient = Recipient::to("a@example.com", None);
        recipient.set_type_bcc();
        assert_eq!(recipient.recipient_type(), Some("bcc"));
        assert!(recipient.fields().get("name").is_none());
    }

    #[test]
    fn test_bulk_ingestion() {
        let raw = json!({"email": "b@example.com", "type": "cc", "unknown": 1});
        let recipient = Recipient::from_fields(raw.as_object().unwrap().clone());
        assert_eq!(recipient.email(), Some("b@example.com"));
        assert!(recipient.data().get("unknown").is_none());
    }
}
