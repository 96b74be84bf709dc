//! Entity schema behaviour across every kind

use crate::errors::ModelError;
use crate::{
    Address, Entity, EntityKind, Export, Media, MandrillError, Message, MessageQuery, Metadata,
    Params, Recipient, Subaccount, Template, Webhook,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn raw_with_extras(kind: EntityKind) -> Params {
    let mut raw = Params::new();
    for (name, _) in kind.schema() {
        raw.insert(name.to_string(), json!("x"));
    }
    raw.insert("not_a_field".to_string(), json!(1));
    raw.insert("also_unknown".to_string(), json!({ "a": 1 }));
    raw
}

fn check_intersection<E: Entity>() {
    let entity = E::from_fields(raw_with_extras(E::KIND));
    let mut stored: Vec<&str> = entity.data().keys().map(String::as_str).collect();
    let mut declared: Vec<&str> = E::KIND.schema().iter().map(|(n, _)| *n).collect();
    stored.sort_unstable();
    declared.sort_unstable();
    assert_eq!(stored, declared, "kind {}", E::KIND);
}

fn check_strict_access<E: Entity>() {
    let mut entity = E::from_fields(Params::new());
    assert!(matches!(
        entity.get("definitely_not_declared"),
        Err(MandrillError::Model(ModelError::UndefinedField { .. }))
    ));
    assert!(matches!(
        entity.set("definitely_not_declared", json!(1)),
        Err(MandrillError::Model(ModelError::UndefinedField { .. }))
    ));
    assert!(entity.data().is_empty());
}

#[test]
fn test_bulk_ingestion_keeps_only_schema_fields() {
    check_intersection::<Message>();
    check_intersection::<Recipient>();
    check_intersection::<Media>();
    check_intersection::<Template>();
    check_intersection::<MessageQuery>();
    check_intersection::<Address>();
    check_intersection::<Webhook>();
    check_intersection::<Subaccount>();
    check_intersection::<Export>();
    check_intersection::<Metadata>();
}

#[test]
fn test_unknown_fields_are_rejected() {
    check_strict_access::<Message>();
    check_strict_access::<Recipient>();
    check_strict_access::<Media>();
    check_strict_access::<Template>();
    check_strict_access::<MessageQuery>();
    check_strict_access::<Address>();
    check_strict_access::<Webhook>();
    check_strict_access::<Subaccount>();
    check_strict_access::<Export>();
    check_strict_access::<Metadata>();
}

#[test]
fn test_ingestion_coerces_scalars() {
    let mut raw = Params::new();
    raw.insert("limit".to_string(), json!("42"));
    raw.insert("query".to_string(), json!(7));
    let query = MessageQuery::from_fields(raw);

    assert_eq!(query.get("limit").unwrap(), Some(&json!(42)));
    assert_eq!(query.get("query").unwrap(), Some(&json!("7")));

    let mut raw = Params::new();
    raw.insert("important".to_string(), json!("1"));
    raw.insert("track_opens".to_string(), json!(""));
    let message = Message::from_fields(raw);
    assert_eq!(message.get("important").unwrap(), Some(&json!(true)));
    assert_eq!(message.get("track_opens").unwrap(), Some(&json!(false)));
}

#[test]
fn test_set_stores_verbatim() {
    let mut query = MessageQuery::new();
    query.set("limit", json!("not a number")).unwrap();
    assert_eq!(query.get("limit").unwrap(), Some(&json!("not a number")));
}

#[test]
fn test_append_accumulates_in_order() {
    let mut message = Message::new();
    message.append_to_list("tags", json!("a")).unwrap();
    message.append_to_list("tags", json!("b")).unwrap();
    message.append_to_list("tags", json!("c")).unwrap();
    assert_eq!(message.get("tags").unwrap(), Some(&json!(["a", "b", "c"])));
}

#[test]
fn test_keyed_append_ignores_key() {
    let mut message = Message::new();
    message
        .append_to_list_keyed("google_analytics_domains", "ignored", json!("example.com"))
        .unwrap();
    assert_eq!(
        message.get("google_analytics_domains").unwrap(),
        Some(&json!(["example.com"]))
    );
}

#[test]
fn test_append_to_scalar_fails() {
    let mut message = Message::new();
    message.set("tags", json!("scalar")).unwrap();
    assert!(matches!(
        message.append_to_list("tags", json!("x")),
        Err(MandrillError::Model(ModelError::NotAList { .. }))
    ));
}

#[test]
fn test_keyed_insert_into_scalar_fails() {
    let mut message = Message::new();
    message.set("headers", json!("X-Tag: 1")).unwrap();
    assert!(matches!(
        message.add_header("Reply-To", "r@example.com"),
        Err(MandrillError::Model(ModelError::NotAMap { .. }))
    ));
    assert_eq!(message.get("headers").unwrap(), Some(&json!("X-Tag: 1")));

    let mut recipient = Recipient::to("a@example.com", None);
    recipient.set("metadata", json!(["not", "a", "map"])).unwrap();
    assert!(matches!(
        recipient.add_metadata("user_id", 1),
        Err(MandrillError::Model(ModelError::NotAMap { .. }))
    ));
}

#[test]
fn test_message_composition() {
    let mut first = Recipient::to("one@example.com", Some("One"));
    first.add_metadata("user_id", 1).unwrap();
    let second = Recipient::to("two@example.com", None);
    let attachment = Media::from_base64("a.txt", "text/plain", "aGVsbG8=");

    let mut message = Message::new();
    message.set("subject", json!("hello")).unwrap();
    message.add_recipient(&first).unwrap();
    message.add_recipient(&second).unwrap();
    message.add_attachment(&attachment).unwrap();

    let fields = message.fields();
    let to = fields["to"].as_array().unwrap();
    assert_eq!(to.len(), 2);
    for entry in to {
        let mut keys: Vec<&str> = entry.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert!(keys.iter().all(|k| ["email", "name", "type"].contains(k)));
    }
    assert_eq!(to[0]["email"], json!("one@example.com"));
    assert_eq!(fields["attachments"].as_array().unwrap().len(), 1);
    assert_eq!(
        fields["recipient_metadata"],
        json!([{ "rcpt": "one@example.com", "values": { "user_id": 1 } }])
    );

    // the composed copy is independent of the recipient
    first.set("email", json!("changed@example.com")).unwrap();
    assert_eq!(message.fields()["to"][0]["email"], json!("one@example.com"));
}

#[test]
fn test_query_terms() {
    let mut query = MessageQuery::new();
    query.by_sender(["a@example.com", "b@example.com"]);
    assert_eq!(
        query.query(),
        Some("sender:a@example.com AND sender:b@example.com")
    );

    query.by_tags(["welcome"]);
    assert_eq!(query.query(), Some("tags:welcome"));
    assert_eq!(query.get("query").unwrap().and_then(Value::as_str), query.query());
}
