//! Rejection list service for the Mandrill API.

use crate::client::Session;
use crate::errors::MandrillResult;
use crate::models::{Address, Entity};
use crate::services::params;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

/// Rejects service implementation
#[derive(Debug, Clone)]
pub struct RejectsService {
    session: Arc<Session>,
}

impl RejectsService {
    /// Create a new rejects service
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Block an address
    #[instrument(skip(self, address))]
    pub async fn add(&self, address: &Address) -> MandrillResult<Value> {
        self.session.request("rejects/add", address.fields()).await
    }

    /// List blocked addresses, optionally one address or one subaccount
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        email: Option<&str>,
        include_expired: bool,
        subaccount: Option<&str>,
    ) -> MandrillResult<Value> {
        self.session
            .request(
                "rejects/list",
                params(json!({
                    "email": email,
                    "include_expired": include_expired,
                    "subaccount": subaccount,
                })),
            )
            .await
    }

    /// Unblock an address
    #[instrument(skip(self))]
    pub async fn delete(&self, email: &str, subaccount: Option<&str>) -> MandrillResult<Value> {
        self.session
            .request(
                "rejects/delete",
                params(json!({ "email": email, "subaccount": subaccount })),
            )
            .await
    }
}
