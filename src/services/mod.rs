//! Service implementations for Mandrill API endpoints.
//!
//! Each service covers one endpoint group. Methods build the parameter map
//! and hand it to the shared [`Session`](crate::client::Session); the decoded
//! response is returned as-is. Optional arguments left as `None` are sent as
//! JSON `null`.

pub mod exports;
pub mod inbound;
pub mod ips;
pub mod messages;
pub mod metadata;
pub mod rejects;
pub mod senders;
pub mod subaccounts;
pub mod tags;
pub mod templates;
pub mod urls;
pub mod users;
pub mod webhooks;
pub mod whitelists;

pub use exports::ExportsService;
pub use inbound::InboundService;
pub use ips::IpsService;
pub use messages::MessagesService;
pub use metadata::MetadataService;
pub use rejects::RejectsService;
pub use senders::SendersService;
pub use subaccounts::SubaccountsService;
pub use tags::TagsService;
pub use templates::TemplatesService;
pub use urls::UrlsService;
pub use users::UsersService;
pub use webhooks::WebhooksService;
pub use whitelists::WhitelistsService;

use crate::errors::{MandrillResult, RequestError};
use crate::types::Params;
use serde::Serialize;
use serde_json::Value;

/// Turn a `json!({...})` literal into a parameter map
pub(crate) fn params(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        _ => Params::new(),
    }
}

/// Serialize a typed request into a parameter map
pub(crate) fn to_params<T: Serialize>(request: &T) -> MandrillResult<Params> {
    match serde_json::to_value(request) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(RequestError::Serialization {
            message: format!("expected an object, got {}", other),
        }
        .into()),
        Err(e) => Err(RequestError::Serialization {
            message: e.to_string(),
        }
        .into()),
    }
}
