//! Mandrill API Client
//!
//! Async client for the Mandrill transactional email API with:
//! - Schema-checked request entities (messages, recipients, templates, ...)
//! - One service per endpoint group (messages, templates, webhooks, ips, ...)
//! - Typed error classification of the API error envelope
//! - Key resolution from configuration or the conventional key files
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mandrill_client::{Entity, Message, Recipient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = mandrill_client::create_client_from_env()?;
//!
//!     let mut message = Message::new();
//!     message.set("subject", "Hello".into())?;
//!     message.set("text", "Hello from Mandrill".into())?;
//!     message.set("from_email", "sender@example.com".into())?;
//!     message.add_recipient(&Recipient::to("someone@example.com", Some("Someone")))?;
//!
//!     let result = client.messages().send(&message).await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `rustls` - Use rustls for TLS (default)
//! - `native-tls` - Use the platform TLS stack

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod transport;
pub mod types;

// Request entities
pub mod models;

// Services
pub mod services;

// Observability
pub mod observability;

// Testing utilities
pub mod mocks;

// Tests
#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use client::{MandrillClient, Session};
pub use config::{MandrillConfig, MandrillConfigBuilder};
pub use errors::{ApiError, ApiErrorKind, MandrillError, MandrillResult};
pub use models::{
    Address, Entity, EntityKind, Export, Media, Message, MessageQuery, Metadata, Recipient,
    Subaccount, Template, Webhook,
};
pub use types::{FieldType, Params};

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://mandrillapp.com/api";

/// API version path segment
pub const API_VERSION: &str = "1.0";

/// Service name, also used for the key file names
pub const SERVICE_NAME: &str = "mandrill";

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("mandrill-client-rust/", env!("CARGO_PKG_VERSION"));

/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default total request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// Create a Mandrill client with the given configuration
pub fn create_client(config: MandrillConfig) -> MandrillResult<MandrillClient> {
    MandrillClient::new(config)
}

/// Create a Mandrill client from environment variables
///
/// Reads:
/// - `MANDRILL_API_KEY` - API key (falls back to `~/.mandrill.key`, then `/etc/mandrill.key`)
/// - `MANDRILL_BASE_URL` - API root
/// - `MANDRILL_DEBUG` - log each request and response
/// - `MANDRILL_TIMEOUT` - total request timeout in seconds
pub fn create_client_from_env() -> MandrillResult<MandrillClient> {
    let config = MandrillConfig::from_env()?;
    create_client(config)
}
