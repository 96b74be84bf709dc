//! Authentication management for the Mandrill client.
//!
//! Mandrill does not use header based auth: the API key travels in the JSON
//! body under the reserved `key` field. The key is resolved once, when the
//! client is created.

use crate::config::MandrillConfig;
use crate::errors::{ConfigurationError, MandrillResult};
use crate::types::Params;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Body field carrying the API key
pub const KEY_FIELD: &str = "key";

/// Secure wrapper for the Mandrill API key
#[derive(Clone)]
pub struct ApiKey {
    key: SecretString,
}

impl ApiKey {
    /// Create a new key
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: SecretString::new(key.into()),
        }
    }

    /// Expose the key for use in requests
    pub(crate) fn expose(&self) -> &str {
        self.key.expose_secret()
    }

    /// Whether the key is empty or whitespace
    pub fn is_blank(&self) -> bool {
        self.expose().trim().is_empty()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey([REDACTED])")
    }
}

/// Where the resolved key came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Set explicitly in configuration
    Config,
    /// Read from a key file
    File(PathBuf),
}

/// Resolve the API key: explicit configuration first, then each key file in order
pub fn resolve_api_key(config: &MandrillConfig) -> MandrillResult<(ApiKey, KeySource)> {
    if let Some(key) = config.api_key().filter(|k| !k.is_blank()) {
        return Ok((key.clone(), KeySource::Config));
    }

    for path in &config.key_files {
        if let Some(key) = read_key_file(path) {
            debug!(path = %path.display(), "Loaded API key from key file");
            return Ok((key, KeySource::File(path.clone())));
        }
    }

    Err(ConfigurationError::MissingApiKey.into())
}

/// Read and trim a key file, ignoring missing, unreadable or blank files
fn read_key_file(path: &Path) -> Option<ApiKey> {
    let contents = fs::read_to_string(path).ok()?;
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        debug!(path = %path.display(), "Key file is empty, skipping");
        return None;
    }
    Some(ApiKey::new(trimmed))
}

/// Authentication manager for Mandrill API requests
#[derive(Clone)]
pub struct AuthManager {
    key: Arc<ApiKey>,
    source: KeySource,
}

impl AuthManager {
    /// Resolve the key for a configuration
    pub fn from_config(config: &MandrillConfig) -> MandrillResult<Self> {
        let (key, source) = resolve_api_key(config)?;
        Ok(Self {
            key: Arc::new(key),
            source,
        })
    }

    /// Create a manager around an already resolved key
    pub fn new(key: ApiKey) -> Self {
        Self {
            key: Arc::new(key),
            source: KeySource::Config,
        }
    }

    /// Where the key was found
    pub fn source(&self) -> &KeySource {
        &self.source
    }

    /// Merge the API key into a parameter map, overriding any caller supplied `key`
    pub fn sign(&self, mut params: Params) -> Params {
        params.insert(
            KEY_FIELD.to_string(),
            Value::String(self.key.expose().to_string()),
        );
        params
    }
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager")
            .field("key", &"[REDACTED]")
            .field("source", &self.source)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MandrillConfigBuilder;
    use crate::errors::MandrillError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_explicit_key_wins() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "file-key").unwrap();

        let config = MandrillConfigBuilder::new()
            .api_key("config-key")
            .key_files([file.path()])
            .build_unchecked();

        let (key, source) = resolve_api_key(&config).unwrap();
        assert_eq!(key.expose(), "config-key");
        assert_eq!(source, KeySource::Config);
    }

    #[test]
    fn test_key_file_is_trimmed() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "  file-key  ").unwrap();

        let config = MandrillConfigBuilder::new()
            .key_files([file.path()])
            .build_unchecked();

        let (key, source) = resolve_api_key(&config).unwrap();
        assert_eq!(key.expose(), "file-key");
        assert_eq!(source, KeySource::File(file.path().to_path_buf()));
    }

    #[test]
    fn test_blank_configured_key_falls_through() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "file-key").unwrap();

        let config = MandrillConfigBuilder::new()
            .api_key("  ")
            .key_files([file.path()])
            .build_unchecked();
        let (key, source) = resolve_api_key(&config).unwrap();
        assert_eq!(key.expose(), "file-key");
        assert_eq!(source, KeySource::File(file.path().to_path_buf()));

        let config = MandrillConfigBuilder::new()
            .api_key("")
            .without_key_files()
            .build_unchecked();
        assert!(matches!(
            resolve_api_key(&config),
            Err(MandrillError::Configuration(ConfigurationError::MissingApiKey))
        ));
    }

    #[test]
    fn test_missing_key() {
        let config = MandrillConfigBuilder::new()
            .key_files(["/nonexistent/.mandrill.key"])
            .build_unchecked();

        assert!(resolve_api_key(&config).is_err());
    }

    #[test]
    fn test_sign_overrides_key_field() {
        let auth = AuthManager::new(ApiKey::new("real"));
        let mut params = Params::new();
        params.insert("key".to_string(), Value::String("spoofed".to_string()));
        params.insert("id".to_string(), Value::String("abc".to_string()));

        let signed = auth.sign(params);
        assert_eq!(signed["key"], "real");
        assert_eq!(signed["id"], "abc");
    }

    #[test]
    fn test_debug_is_redacted() {
        let auth = AuthManager::new(ApiKey::new("secret-value"));
        assert!(!format!("{:?}", auth).contains("secret-value"));
    }
}
