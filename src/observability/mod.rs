//! Observability for the Mandrill client.
//!
//! Request logging with key redaction, and a subscriber helper.

pub mod logging;

pub use logging::*;
