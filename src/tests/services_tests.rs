//! Service routing over the mock transport

use crate::mocks::{MockHttpTransport, MockResponse};
use crate::models::SendOptions;
use crate::services::exports::ActivityExportRequest;
use crate::types::{RecipientStatus, SendResult};
use crate::{
    Entity, MandrillClient, MandrillConfigBuilder, MandrillError, Message, Recipient, Template,
};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;

fn mock_client() -> (MandrillClient, Arc<MockHttpTransport>) {
    let transport =
        Arc::new(MockHttpTransport::new().with_default_response(MockResponse::ok("{}")));
    let config = MandrillConfigBuilder::new()
        .api_key("svc-key")
        .without_key_files()
        .build()
        .unwrap();
    let client = MandrillClient::with_transport(config, transport.clone()).unwrap();
    (client, transport)
}

fn plain_message() -> Message {
    let mut message = Message::new();
    message.set("subject", json!("Hi")).unwrap();
    message.set("from_email", json!("from@example.com")).unwrap();
    message
        .add_recipient(&Recipient::to("to@example.com", Some("To")))
        .unwrap();
    message
}

#[tokio::test]
async fn test_send_plain_message() {
    let (client, transport) = mock_client();
    transport.enqueue(MockResponse::json(
        200,
        json!([{ "email": "to@example.com", "status": "sent", "_id": "abc", "reject_reason": null }]),
    ));

    let result = client.messages().send(&plain_message()).await.unwrap();
    let results = SendResult::from_value(result).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, RecipientStatus::Sent);
    assert_eq!(results[0].id.as_deref(), Some("abc"));

    let recorded = transport.last_request().unwrap();
    assert_eq!(recorded.endpoint(), Some("messages/send"));
    let body = recorded.json();
    assert_eq!(body["key"], json!("svc-key"));
    assert_eq!(body["message"]["subject"], json!("Hi"));
    assert_eq!(body["async"], json!(false));
    assert_eq!(body["ip_pool"], Value::Null);
    assert_eq!(body["send_at"], Value::Null);
}

#[tokio::test]
async fn test_send_template_message() {
    let (client, transport) = mock_client();
    let mut template = Template::named("welcome");
    template.add_content("header", "<h1>Hi</h1>").unwrap();

    let mut message = plain_message();
    message.set_template(template);
    client.messages().send(&message).await.unwrap();

    let recorded = transport.last_request().unwrap();
    assert_eq!(recorded.endpoint(), Some("messages/send-template"));
    let body = recorded.json();
    assert_eq!(body["template_name"], json!("welcome"));
    assert_eq!(
        body["template_content"],
        json!([{ "name": "header", "content": "<h1>Hi</h1>" }])
    );
    assert_eq!(body["message"]["to"][0]["email"], json!("to@example.com"));
}

#[tokio::test]
async fn test_send_raw_message() {
    let (client, transport) = mock_client();
    let mut message = plain_message();
    message
        .set("raw_message", json!("From: from@example.com\r\n\r\nbody"))
        .unwrap();

    let at = Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap();
    let options = SendOptions::new().send_async(true).ip_pool("Main Pool").send_at(at);
    client
        .messages()
        .send_with_options(&message, &options)
        .await
        .unwrap();

    let recorded = transport.last_request().unwrap();
    assert_eq!(recorded.endpoint(), Some("messages/send-raw"));
    let body = recorded.json();
    assert_eq!(body["to"], json!(["to@example.com"]));
    assert_eq!(body["from_email"], json!("from@example.com"));
    assert_eq!(body["async"], json!(true));
    assert_eq!(body["ip_pool"], json!("Main Pool"));
    assert_eq!(body["send_at"], json!("2030-01-02 03:04:05"));
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_users_ping_forms() {
    let (client, transport) = mock_client();
    client.users().ping(false).await.unwrap();
    client.users().ping(true).await.unwrap();

    let requests = transport.recorded_requests();
    assert_eq!(requests[0].endpoint(), Some("users/ping"));
    assert_eq!(requests[1].endpoint(), Some("users/ping2"));
}

#[tokio::test]
async fn test_ips_endpoints() {
    let (client, transport) = mock_client();
    client.ips().provision(true, None).await.unwrap();
    client.ips().set_pool("10.0.0.1", "bulk", true).await.unwrap();
    client
        .ips()
        .set_custom_dns("10.0.0.1", "mail.example.com")
        .await
        .unwrap();

    let requests = transport.recorded_requests();
    assert_eq!(requests[0].endpoint(), Some("ips/provision"));
    assert_eq!(requests[0].json()["pool"], Value::Null);
    assert_eq!(requests[1].endpoint(), Some("ips/set-pool"));
    assert_eq!(requests[1].json()["create_pool"], json!(true));
    assert_eq!(requests[2].endpoint(), Some("ips/set-custom-dns"));
}

#[tokio::test]
async fn test_rejects_endpoints() {
    let (client, transport) = mock_client();
    client
        .rejects()
        .list(Some("a@example.com"), true, None)
        .await
        .unwrap();
    client.rejects().delete("a@example.com", Some("sub-1")).await.unwrap();

    let requests = transport.recorded_requests();
    assert_eq!(requests[0].endpoint(), Some("rejects/list"));
    assert_eq!(requests[0].json()["include_expired"], json!(true));
    assert_eq!(requests[0].json()["subaccount"], Value::Null);
    assert_eq!(requests[1].endpoint(), Some("rejects/delete"));
    assert_eq!(requests[1].json()["subaccount"], json!("sub-1"));
}

#[tokio::test]
async fn test_exports_activity() {
    let (client, transport) = mock_client();
    let request = ActivityExportRequest::new().notify_email("ops@example.com");
    client.exports().activity(&request).await.unwrap();

    let recorded = transport.last_request().unwrap();
    assert_eq!(recorded.endpoint(), Some("exports/activity"));
    assert_eq!(recorded.json()["notify_email"], json!("ops@example.com"));
    assert_eq!(recorded.json()["date_from"], Value::Null);
}

#[tokio::test]
async fn test_timeout_surfaces_as_network_error() {
    let (client, transport) = mock_client();
    transport.enqueue(MockResponse::timed_out());

    let err = client.tags().list().await.unwrap_err();
    assert!(matches!(err, MandrillError::Network(_)));
    assert_eq!(err.error_code(), "MANDRILL_NETWORK");
}
