//! Messages service for the Mandrill API.
//!
//! Sending (plain, template and raw), searching and scheduling.

mod service;

pub use crate::models::SendOptions;
pub use service::*;
