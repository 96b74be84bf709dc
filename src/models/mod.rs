//! Request entities.
//!
//! Each entity is a field map checked against a static schema for its kind.
//! Entities are plain values: composing them (adding a recipient to a
//! message, say) copies data, it never shares it.

pub mod coerce;
mod entity;
mod media;
mod message;
mod query;
mod recipient;
mod records;
pub mod schema;
mod template;

pub use entity::Entity;
pub use media::{Media, FILE_SIZE_MAX};
pub use message::{format_send_at, Message, SendOptions, SEND_AT_FORMAT};
pub use query::MessageQuery;
pub use recipient::Recipient;
pub use records::{Address, Export, Metadata, Subaccount, Webhook};
pub use schema::{EntityKind, Schema};
pub use template::Template;
