//! Logging utilities with API key redaction.

use crate::auth::KEY_FIELD;
use crate::types::Params;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::{fmt as subscriber_fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Placeholder written in place of secrets
pub const REDACTED: &str = "[REDACTED]";

/// Wrapper for sensitive data that redacts on display
#[derive(Clone)]
pub struct Redacted<T>(T);

impl<T> Redacted<T> {
    /// Create a new redacted value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Get the inner value
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl<T> fmt::Debug for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

/// Redact an API key, keeping a short prefix to tell keys apart
pub fn redact_key(key: &str) -> String {
    match key.char_indices().nth(4) {
        Some((idx, _)) if key.len() > 8 => format!("{}...{}", &key[..idx], REDACTED),
        _ => REDACTED.to_string(),
    }
}

/// Render a request payload as JSON with the API key redacted
pub fn redact_params(params: &Params) -> String {
    let mut copy = params.clone();
    if let Some(redacted) = copy.get(KEY_FIELD).and_then(Value::as_str).map(redact_key) {
        copy.insert(KEY_FIELD.to_string(), Value::String(redacted));
    }
    Value::Object(copy).to_string()
}

/// Log an outgoing call
pub fn log_request(request_id: &str, url: &str, params: &Params) {
    tracing::debug!(
        request_id = request_id,
        url = url,
        payload = %redact_params(params),
        "Call to {}",
        url
    );
}

/// Log the outcome of a call
pub fn log_response(request_id: &str, status: u16, elapsed: Duration, body: &str) {
    let duration_ms = format!("{:.2}", elapsed.as_secs_f64() * 1000.0);
    tracing::debug!(
        request_id = request_id,
        status = status,
        duration_ms = %duration_ms,
        "Completed in {}ms",
        duration_ms
    );
    tracing::debug!(request_id = request_id, body = body, "Got response");
}

/// Log a call that failed before a response arrived
pub fn log_failure(request_id: &str, elapsed: Duration, error: &dyn fmt::Display) {
    let duration_ms = format!("{:.2}", elapsed.as_secs_f64() * 1000.0);
    tracing::debug!(
        request_id = request_id,
        duration_ms = %duration_ms,
        error = %error,
        "Failed after {}ms",
        duration_ms
    );
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Trace level
    Trace,
    /// Debug level
    Debug,
    /// Info level
    Info,
    /// Warning level
    Warn,
    /// Error level
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl From<LogLevel> for tracing::level_filters::LevelFilter {
    fn from(level: LogLevel) -> Self {
        tracing::level_filters::LevelFilter::from_level(level.into())
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable
    Pretty,
    /// One JSON object per line
    Json,
    /// Single line, terse
    Compact,
}

/// Subscriber settings for applications that do not install their own
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level
    pub level: LogLevel,
    /// Output format
    pub format: LogFormat,
    /// Include the module target
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            include_target: true,
        }
    }
}

impl LoggingConfig {
    /// Default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum level
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the output format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Install a global subscriber; `RUST_LOG` directives are honoured
    ///
    /// # Errors
    ///
    /// Fails if a global subscriber is already installed.
    pub fn init(self) -> Result<(), Box<dyn std::error::Error>> {
        let filter = EnvFilter::from_default_env().add_directive(
            tracing::level_filters::LevelFilter::from(self.level).into(),
        );

        match self.format {
            LogFormat::Pretty => tracing_subscriber::registry()
                .with(filter)
                .with(subscriber_fmt::layer().with_target(self.include_target))
                .try_init()?,
            LogFormat::Json => tracing_subscriber::registry()
                .with(filter)
                .with(subscriber_fmt::layer().json())
                .try_init()?,
            LogFormat::Compact => tracing_subscriber::registry()
                .with(filter)
                .with(subscriber_fmt::layer().compact())
                .try_init()?,
        }

        Ok(())
    }
}

/// Install a subscriber with default settings at the given level
pub fn init_logging(level: LogLevel) -> Result<(), Box<dyn std::error::Error>> {
    LoggingConfig::new().with_level(level).init()
}
