//! Configuration management for the Mandrill client.
//!
//! Supports configuration via:
//! - Explicit values
//! - Environment variables
//! - Builder pattern
//!
//! The API key may be left unset here; it is then looked up in the
//! conventional key files when the client is created.

use crate::auth::ApiKey;
use crate::errors::{ConfigurationError, MandrillResult};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Configuration for the Mandrill client
#[derive(Clone)]
pub struct MandrillConfig {
    /// Explicitly supplied API key
    pub(crate) api_key: Option<ApiKey>,
    /// API root, without the version segment
    pub base_url: Url,
    /// API version path segment
    pub api_version: String,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// Total request timeout
    pub timeout: Duration,
    /// User agent sent with every request
    pub user_agent: String,
    /// Log every request, response and timing
    pub debug: bool,
    /// Key files consulted, in order, when no key is configured
    pub key_files: Vec<PathBuf>,
}

impl std::fmt::Debug for MandrillConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MandrillConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("connect_timeout", &self.connect_timeout)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("debug", &self.debug)
            .field("key_files", &self.key_files)
            .finish()
    }
}

impl Default for MandrillConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            api_version: crate::API_VERSION.to_string(),
            connect_timeout: Duration::from_secs(crate::DEFAULT_CONNECT_TIMEOUT_SECS),
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT_SECS),
            user_agent: crate::USER_AGENT.to_string(),
            debug: false,
            key_files: default_key_files(),
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(crate::DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL")
}

/// Conventional key file locations: `~/.mandrill.key`, then `/etc/mandrill.key`
pub fn default_key_files() -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(2);
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(format!(".{}.key", crate::SERVICE_NAME)));
    }
    paths.push(PathBuf::from(format!("/etc/{}.key", crate::SERVICE_NAME)));
    paths
}

impl MandrillConfig {
    /// Create a new configuration builder
    pub fn builder() -> MandrillConfigBuilder {
        MandrillConfigBuilder::new()
    }

    /// Create configuration from environment variables
    ///
    /// Reads:
    /// - `MANDRILL_API_KEY` - API key
    /// - `MANDRILL_BASE_URL` - API root
    /// - `MANDRILL_DEBUG` - `1`/`true` enables request logging
    /// - `MANDRILL_TIMEOUT` - total timeout in seconds
    pub fn from_env() -> MandrillResult<Self> {
        let mut builder = MandrillConfigBuilder::new();

        if let Some(key) = std::env::var("MANDRILL_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
        {
            builder = builder.api_key(key);
        }

        if let Ok(url) = std::env::var("MANDRILL_BASE_URL") {
            builder = builder.base_url(&url)?;
        }

        if let Ok(debug) = std::env::var("MANDRILL_DEBUG") {
            builder = builder.debug(matches!(debug.as_str(), "1" | "true" | "TRUE" | "yes"));
        }

        if let Ok(timeout) = std::env::var("MANDRILL_TIMEOUT") {
            if let Ok(secs) = timeout.parse::<u64>() {
                builder = builder.timeout(Duration::from_secs(secs));
            }
        }

        builder.build()
    }

    /// The explicitly configured API key, if any
    pub fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Build the full URL for an endpoint: `{root}/{version}/{endpoint}.json`
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        let version = self.api_version.trim_matches('/');
        let path = endpoint.trim_matches('/');
        format!("{}/{}/{}.json", base, version, path)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.api_version.trim_matches('/').is_empty() {
            return Err(ConfigurationError::InvalidConfiguration {
                message: "API version must not be empty".to_string(),
            });
        }

        if self.timeout.is_zero() || self.connect_timeout.is_zero() {
            return Err(ConfigurationError::InvalidConfiguration {
                message: "Timeouts must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for MandrillConfig
#[derive(Default)]
pub struct MandrillConfigBuilder {
    config: MandrillConfig,
}

impl MandrillConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: MandrillConfig::default(),
        }
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(ApiKey::new(key));
        self
    }

    /// Set the API root
    pub fn base_url(mut self, url: &str) -> Result<Self, ConfigurationError> {
        self.config.base_url =
            Url::parse(url).map_err(|e| ConfigurationError::InvalidConfiguration {
                message: format!("Invalid URL: {}", e),
            })?;
        Ok(self)
    }

    /// Set the API version segment
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.config.api_version = version.into();
        self
    }

    /// Set the connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the total request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Enable or disable debug logging
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Replace the key files consulted when no key is configured
    pub fn key_files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.config.key_files = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Do not consult any key file
    pub fn without_key_files(mut self) -> Self {
        self.config.key_files.clear();
        self
    }

    /// Build the configuration
    pub fn build(self) -> MandrillResult<MandrillConfig> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Build the configuration without validation (for testing)
    pub fn build_unchecked(self) -> MandrillConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = MandrillConfigBuilder::new()
            .api_key("test-key")
            .timeout(Duration::from_secs(60))
            .debug(true)
            .build()
            .unwrap();

        assert!(config.api_key().is_some());
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert!(config.debug);
    }

    #[test]
    fn test_defaults() {
        let config = MandrillConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(600));
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert_eq!(config.api_version, "1.0");
        assert_eq!(
            config.key_files.last().unwrap(),
            &PathBuf::from("/etc/mandrill.key")
        );
    }

    #[test]
    fn test_endpoint_url() {
        let config = MandrillConfig::default();

        assert_eq!(
            config.endpoint_url("messages/send"),
            "https://mandrillapp.com/api/1.0/messages/send.json"
        );
        assert_eq!(
            config.endpoint_url("/users/ping2"),
            "https://mandrillapp.com/api/1.0/users/ping2.json"
        );
    }

    #[test]
    fn test_endpoint_url_custom_root() {
        let config = MandrillConfigBuilder::new()
            .base_url("http://127.0.0.1:8080/")
            .unwrap()
            .build_unchecked();

        assert_eq!(
            config.endpoint_url("templates/info"),
            "http://127.0.0.1:8080/1.0/templates/info.json"
        );
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let result = MandrillConfigBuilder::new()
            .timeout(Duration::ZERO)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_from_env_ignores_blank_key() {
        std::env::set_var("MANDRILL_API_KEY", "   ");
        let config = MandrillConfig::from_env();
        std::env::remove_var("MANDRILL_API_KEY");

        assert!(config.unwrap().api_key().is_none());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = MandrillConfigBuilder::new()
            .api_key("super-secret")
            .build_unchecked();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
    }
}
