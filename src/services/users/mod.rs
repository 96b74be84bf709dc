//! Users service for the Mandrill API.

use crate::client::Session;
use crate::errors::MandrillResult;
use crate::services::params;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

/// Users service implementation
#[derive(Debug, Clone)]
pub struct UsersService {
    session: Arc<Session>,
}

impl UsersService {
    /// Create a new users service
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Account information and stats
    #[instrument(skip(self))]
    pub async fn info(&self) -> MandrillResult<Value> {
        self.session.request("users/info", params(json!({}))).await
    }

    /// Validate the key
    ///
    /// Returns the string `"PONG!"`, or `{"PING": "PONG!"}` when `json` is set.
    #[instrument(skip(self))]
    pub async fn ping(&self, json: bool) -> MandrillResult<Value> {
        let endpoint = if json { "users/ping2" } else { "users/ping" };
        self.session.request(endpoint, params(json!({}))).await
    }

    /// Senders that have used this account
    #[instrument(skip(self))]
    pub async fn senders(&self) -> MandrillResult<Value> {
        self.session.request("users/senders", params(json!({}))).await
    }
}
