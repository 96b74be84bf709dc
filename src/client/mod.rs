//! Mandrill client implementation.
//!
//! Provides the main entry point for interacting with the Mandrill API.

mod session;

pub use session::Session;

use crate::auth::AuthManager;
use crate::config::MandrillConfig;
use crate::errors::MandrillResult;
use crate::services::{
    ExportsService, InboundService, IpsService, MessagesService, MetadataService,
    RejectsService, SendersService, SubaccountsService, TagsService, TemplatesService,
    UrlsService, UsersService, WebhooksService, WhitelistsService,
};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::Params;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Main Mandrill client
pub struct MandrillClient {
    session: Arc<Session>,
    messages_service: MessagesService,
    templates_service: TemplatesService,
    webhooks_service: WebhooksService,
    subaccounts_service: SubaccountsService,
    tags_service: TagsService,
    exports_service: ExportsService,
    urls_service: UrlsService,
    inbound_service: InboundService,
    metadata_service: MetadataService,
    users_service: UsersService,
    senders_service: SendersService,
    rejects_service: RejectsService,
    whitelists_service: WhitelistsService,
    ips_service: IpsService,
}

impl MandrillClient {
    /// Create a new client with the given configuration
    ///
    /// The API key is resolved here: the configured key, else the first
    /// non-empty key file.
    pub fn new(config: MandrillConfig) -> MandrillResult<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config)?);
        Self::with_transport(config, transport)
    }

    /// Create a new client with a custom transport
    pub fn with_transport(
        config: MandrillConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> MandrillResult<Self> {
        config.validate()?;
        let auth = AuthManager::from_config(&config)?;
        debug!(source = ?auth.source(), base_url = %config.base_url, "Mandrill client created");

        let session = Arc::new(Session::new(Arc::new(config), auth, transport));

        Ok(Self {
            messages_service: MessagesService::new(session.clone()),
            templates_service: TemplatesService::new(session.clone()),
            webhooks_service: WebhooksService::new(session.clone()),
            subaccounts_service: SubaccountsService::new(session.clone()),
            tags_service: TagsService::new(session.clone()),
            exports_service: ExportsService::new(session.clone()),
            urls_service: UrlsService::new(session.clone()),
            inbound_service: InboundService::new(session.clone()),
            metadata_service: MetadataService::new(session.clone()),
            users_service: UsersService::new(session.clone()),
            senders_service: SendersService::new(session.clone()),
            rejects_service: RejectsService::new(session.clone()),
            whitelists_service: WhitelistsService::new(session.clone()),
            ips_service: IpsService::new(session.clone()),
            session,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &MandrillConfig {
        self.session.config()
    }

    /// Get the shared session
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Call any endpoint directly, e.g. `request("users/ping2", Params::new())`
    pub async fn request(&self, endpoint: &str, params: Params) -> MandrillResult<Value> {
        self.session.request(endpoint, params).await
    }

    /// Messages: send, search, schedule
    pub fn messages(&self) -> &MessagesService {
        &self.messages_service
    }

    /// Templates
    pub fn templates(&self) -> &TemplatesService {
        &self.templates_service
    }

    /// Webhooks
    pub fn webhooks(&self) -> &WebhooksService {
        &self.webhooks_service
    }

    /// Subaccounts
    pub fn subaccounts(&self) -> &SubaccountsService {
        &self.subaccounts_service
    }

    /// Tags
    pub fn tags(&self) -> &TagsService {
        &self.tags_service
    }

    /// Export jobs
    pub fn exports(&self) -> &ExportsService {
        &self.exports_service
    }

    /// Tracked URLs and tracking domains
    pub fn urls(&self) -> &UrlsService {
        &self.urls_service
    }

    /// Inbound domains and routes
    pub fn inbound(&self) -> &InboundService {
        &self.inbound_service
    }

    /// Custom metadata fields
    pub fn metadata(&self) -> &MetadataService {
        &self.metadata_service
    }

    /// Account information
    pub fn users(&self) -> &UsersService {
        &self.users_service
    }

    /// Senders and sending domains
    pub fn senders(&self) -> &SendersService {
        &self.senders_service
    }

    /// Rejection list
    pub fn rejects(&self) -> &RejectsService {
        &self.rejects_service
    }

    /// Whitelist
    pub fn whitelists(&self) -> &WhitelistsService {
        &self.whitelists_service
    }

    /// Dedicated IPs and pools
    pub fn ips(&self) -> &IpsService {
        &self.ips_service
    }
}

impl std::fmt::Debug for MandrillClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MandrillClient")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MandrillConfigBuilder;
    use crate::errors::{ConfigurationError, MandrillError};
    use crate::mocks::{MockHttpTransport, MockResponse};

    #[test]
    fn test_missing_key_fails_construction() {
        let config = MandrillConfigBuilder::new().without_key_files().build().unwrap();
        let transport = Arc::new(MockHttpTransport::new());

        let err = MandrillClient::with_transport(config, transport).unwrap_err();
        assert!(matches!(
            err,
            MandrillError::Configuration(ConfigurationError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn test_request_signs_and_targets_endpoint() {
        let config = MandrillConfigBuilder::new().api_key("test-key").build().unwrap();
        let transport = Arc::new(MockHttpTransport::new());
        transport.enqueue(MockResponse::json(200, serde_json::json!({"PING": "PONG!"})));

        let client = MandrillClient::with_transport(config, transport.clone()).unwrap();
        let value = client.request("users/ping2", Params::new()).await.unwrap();

        assert_eq!(value["PING"], "PONG!");
        let recorded = transport.last_request().unwrap();
        assert_eq!(recorded.url, "https://mandrillapp.com/api/1.0/users/ping2.json");
        assert_eq!(recorded.json()["key"], "test-key");
    }
}
