//! Common types for the Mandrill API.
//!
//! Field storage primitives shared by the request entities, and typed views of
//! the string constants the API uses in its responses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parameter map sent as the JSON request body
pub type Params = Map<String, Value>;

/// Declared primitive type of an entity field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// true / false
    Boolean,
    /// Signed 64-bit integer
    Integer,
    /// Double precision float
    Float,
    /// UTF-8 string
    String,
    /// Ordered list of values
    List,
    /// String keyed map of values
    Map,
    /// Always null
    Null,
}

impl FieldType {
    /// Whether values of this type are scalars subject to coercion
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            FieldType::Boolean | FieldType::Integer | FieldType::Float | FieldType::String
        )
    }

    /// Whether a value already has this type
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (FieldType::Boolean, Value::Bool(_)) => true,
            (FieldType::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (FieldType::Float, Value::Number(n)) => n.is_f64(),
            (FieldType::String, Value::String(_)) => true,
            (FieldType::List, Value::Array(_)) => true,
            (FieldType::Map, Value::Object(_)) => true,
            (FieldType::Null, Value::Null) => true,
            _ => false,
        }
    }
}

/// Recipient header type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecipientType {
    /// Primary recipient
    #[default]
    To,
    /// Carbon copy
    Cc,
    /// Blind carbon copy
    Bcc,
}

impl RecipientType {
    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipientType::To => "to",
            RecipientType::Cc => "cc",
            RecipientType::Bcc => "bcc",
        }
    }
}

impl std::fmt::Display for RecipientType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-recipient status reported by a send call
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientStatus {
    /// Delivered to the MTA
    Sent,
    /// Accepted and queued
    Queued,
    /// Scheduled for later delivery
    Scheduled,
    /// Rejected, see the reject reason
    Rejected,
    /// Invalid recipient address
    Invalid,
    /// Status not known to this client
    #[serde(other)]
    Unknown,
}

/// Reason a recipient was rejected
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectReason {
    /// Permanent bounce
    HardBounce,
    /// Temporary bounce
    SoftBounce,
    /// Marked as spam
    Spam,
    /// Unsubscribed
    #[serde(rename = "unsub")]
    Unsubscribed,
    /// Custom rejection list entry
    Custom,
    /// Sender not allowed
    InvalidSender,
    /// Invalid address
    Invalid,
    /// Test mode sending limit reached
    TestModeLimit,
    /// Matched a rejection rule
    Rule,
    /// Reason not known to this client
    #[serde(other)]
    Unknown,
}

/// State of a sent message, as reported by the message info call
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageState {
    /// Delivered
    Sent,
    /// Hard bounced
    Bounced,
    /// Soft bounced
    SoftBounced,
    /// Rejected
    Rejected,
    /// Reported as spam
    Spam,
    /// Recipient unsubscribed
    #[serde(rename = "unsub")]
    Unsubscribed,
    /// State not known to this client
    #[serde(other)]
    Unknown,
}

/// Kind of export job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportType {
    /// Activity history
    Activity,
    /// Rejection list
    Reject,
    /// Whitelist
    Whitelist,
}

/// State of an export job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportState {
    /// Queued
    Waiting,
    /// Running
    Working,
    /// Result ready
    Complete,
    /// Failed
    Error,
    /// Result no longer available
    Expired,
}

/// State of a custom metadata field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataState {
    /// Indexed and searchable
    Active,
    /// Being deleted
    Delete,
    /// Being indexed
    Index,
}

/// One element of the array returned by the send calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendResult {
    /// Recipient address
    pub email: String,
    /// Delivery status
    pub status: RecipientStatus,
    /// Rejection reason, when rejected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<RejectReason>,
    /// Message id
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl SendResult {
    /// Interpret the value returned by a send call
    pub fn from_value(value: Value) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_type_matches() {
        assert!(FieldType::Integer.matches(&json!(42)));
        assert!(!FieldType::Integer.matches(&json!(4.2)));
        assert!(FieldType::Float.matches(&json!(4.2)));
        assert!(FieldType::List.matches(&json!([])));
        assert!(!FieldType::String.matches(&json!(1)));
        assert!(FieldType::Boolean.is_scalar());
        assert!(!FieldType::Map.is_scalar());
    }

    #[test]
    fn test_send_result_parse() {
        let value = json!([
            {"email": "a@example.com", "status": "sent", "_id": "abc", "reject_reason": null},
            {"email": "b@example.com", "status": "rejected", "_id": "def", "reject_reason": "hard-bounce"},
            {"email": "c@example.com", "status": "something-new"}
        ]);

        let results = SendResult::from_value(value).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].status, RecipientStatus::Sent);
        assert_eq!(results[0].reject_reason, None);
        assert_eq!(results[1].reject_reason, Some(RejectReason::HardBounce));
        assert_eq!(results[2].status, RecipientStatus::Unknown);
    }

    #[test]
    fn test_enum_wire_values() {
        assert_eq!(serde_json::to_value(RejectReason::Unsubscribed).unwrap(), "unsub");
        assert_eq!(serde_json::to_value(RejectReason::TestModeLimit).unwrap(), "test-mode-limit");
        assert_eq!(serde_json::to_value(ExportState::Complete).unwrap(), "complete");
        assert_eq!(RecipientType::Bcc.to_string(), "bcc");
        assert_eq!(serde_json::to_value(MessageState::SoftBounced).unwrap(), "soft-bounced");
        assert_eq!(serde_json::to_value(ExportType::Whitelist).unwrap(), "whitelist");
        assert_eq!(serde_json::to_value(MetadataState::Active).unwrap(), "active");
    }

    #[test]
    fn test_state_values_from_server() {
        let state: MessageState = serde_json::from_value(json!("unsub")).unwrap();
        assert_eq!(state, MessageState::Unsubscribed);
        let state: MessageState = serde_json::from_value(json!("deferred")).unwrap();
        assert_eq!(state, MessageState::Unknown);
        let kind: ExportType = serde_json::from_value(json!("reject")).unwrap();
        assert_eq!(kind, ExportType::Reject);
        let state: MetadataState = serde_json::from_value(json!("delete")).unwrap();
        assert_eq!(state, MetadataState::Delete);
    }
}
