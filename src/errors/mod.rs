//! Error types for the Mandrill client.
//!
//! Every failure surfaces as a [`MandrillError`]. Server-side failures carry an
//! [`ApiErrorKind`] resolved from the symbolic `name` of the error envelope.

use std::fmt;
use thiserror::Error;

/// Result type for Mandrill operations
pub type MandrillResult<T> = Result<T, MandrillError>;

/// Root error type for the Mandrill integration
#[derive(Error, Debug)]
pub enum MandrillError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Entity field access error
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Request construction error
    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Response decoding error
    #[error("Response error: {0}")]
    Response(#[from] ResponseError),

    /// Error envelope returned by the API
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

impl MandrillError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "MANDRILL_CONFIG",
            Self::Model(_) => "MANDRILL_MODEL",
            Self::Request(_) => "MANDRILL_REQUEST",
            Self::Network(_) => "MANDRILL_NETWORK",
            Self::Response(_) => "MANDRILL_RESPONSE",
            Self::Api(_) => "MANDRILL_API",
        }
    }

    /// The classified API error kind, if the server returned an error envelope
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            Self::Api(e) => Some(e.kind),
            _ => None,
        }
    }

    /// Check whether this is an API error of the given kind
    pub fn is_api_kind(&self, kind: ApiErrorKind) -> bool {
        self.api_kind() == Some(kind)
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// No API key in configuration or key files
    #[error("You must provide a Mandrill API key")]
    MissingApiKey,

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Error message
        message: String,
    },
}

/// Entity model errors
#[derive(Error, Debug)]
pub enum ModelError {
    /// Field is not part of the entity schema
    #[error("Undefined field '{field}' on {entity}")]
    UndefinedField {
        /// Entity kind name
        entity: &'static str,
        /// Requested field name
        field: String,
    },

    /// Append on a field that holds a non-list value
    #[error("Field '{field}' on {entity} is not a list")]
    NotAList {
        /// Entity kind name
        entity: &'static str,
        /// Field name
        field: String,
    },

    /// Keyed insert on a field that holds a non-map value
    #[error("Field '{field}' on {entity} is not a map")]
    NotAMap {
        /// Entity kind name
        entity: &'static str,
        /// Field name
        field: String,
    },

    /// Media file missing or unreadable
    #[error("The media file could not be found: {path}")]
    MediaFileNotFound {
        /// File path
        path: String,
    },

    /// Media file too large to attach
    #[error("The media file exceeded the maximum amount of bytes allowed: {path} ({size} > {max})")]
    MediaFileSizeExceeded {
        /// File path
        path: String,
        /// File size in bytes
        size: u64,
        /// Maximum allowed size in bytes
        max: u64,
    },
}

/// Request construction errors
#[derive(Error, Debug)]
pub enum RequestError {
    /// Payload could not be encoded as JSON
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message
        message: String,
    },
}

/// Network errors
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Request timed out
    #[error("Request to {url} timed out")]
    Timeout {
        /// Endpoint URL
        url: String,
    },

    /// Connection failed
    #[error("Connection to {url} failed: {message}")]
    ConnectionFailed {
        /// Endpoint URL
        url: String,
        /// Error message
        message: String,
    },

    /// Any other transport level failure
    #[error("Client API request failed: {url}: {message}")]
    RequestFailed {
        /// Endpoint URL
        url: String,
        /// Error message
        message: String,
    },
}

impl NetworkError {
    /// Classify a reqwest error for the given endpoint
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkError::Timeout {
                url: url.to_string(),
            }
        } else if err.is_connect() {
            NetworkError::ConnectionFailed {
                url: url.to_string(),
                message: err.to_string(),
            }
        } else {
            NetworkError::RequestFailed {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// Endpoint URL of the failed request
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url } => url,
            Self::ConnectionFailed { url, .. } => url,
            Self::RequestFailed { url, .. } => url,
        }
    }
}

/// Response decoding errors
#[derive(Error, Debug)]
pub enum ResponseError {
    /// Body is not valid JSON
    #[error("Unable to decode the JSON response from the Mandrill API: {message}; response: {body}")]
    InvalidJson {
        /// Raw response body
        body: String,
        /// Decoder message
        message: String,
    },
}

/// Error envelope returned by the Mandrill API
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind}: [{code}]: {message}")]
pub struct ApiError {
    /// Classified error kind
    pub kind: ApiErrorKind,
    /// Symbolic name sent by the server, if the envelope had one
    pub name: Option<String>,
    /// Server message
    pub message: String,
    /// Server error code
    pub code: i64,
}

impl ApiError {
    /// Build an error from a symbolic name, falling back to [`ApiErrorKind::Unexpected`]
    pub fn from_name(name: &str, message: impl Into<String>, code: i64) -> Self {
        Self {
            kind: ApiErrorKind::from_name(name).unwrap_or(ApiErrorKind::Unexpected),
            name: Some(name.to_string()),
            message: message.into(),
            code,
        }
    }

    /// Build a generic server error for a malformed envelope
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Unexpected,
            name: None,
            message: message.into(),
            code: 0,
        }
    }
}

/// Classified API error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// The parameters passed to the API call are invalid or not provided
    ValidationError,
    /// The provided API key is not valid
    KeyInvalid,
    /// The requested feature requires payment
    PaymentRequired,
    /// The provided subaccount id does not exist
    SubaccountUnknown,
    /// The requested template does not exist
    TemplateUnknown,
    /// The subsystem providing this API call is down for maintenance
    ServiceUnavailable,
    /// The provided message id does not exist
    MessageUnknown,
    /// The requested tag does not exist or contains invalid characters
    TagNameInvalid,
    /// The requested email is not in the rejection list
    RejectInvalid,
    /// The requested sender does not exist
    SenderUnknown,
    /// The requested URL has not been seen in a tracked link
    UrlUnknown,
    /// The provided tracking domain does not exist
    TrackingDomainUnknown,
    /// The given template name already exists or contains invalid characters
    TemplateInvalid,
    /// The requested webhook does not exist
    WebhookUnknown,
    /// The requested inbound domain does not exist
    InboundDomainUnknown,
    /// The provided inbound route does not exist
    InboundRouteUnknown,
    /// The requested export job does not exist
    ExportUnknown,
    /// A dedicated IP cannot be provisioned while another request is pending
    IpProvisionLimit,
    /// The provided dedicated IP pool does not exist
    PoolUnknown,
    /// The user hasn't started sending yet
    NoSendingHistory,
    /// The user's reputation is too low to continue
    PoorReputation,
    /// The provided dedicated IP does not exist
    IpUnknown,
    /// You cannot remove the last IP from your default IP pool
    EmptyDefaultPoolInvalid,
    /// The default pool cannot be deleted
    DeleteDefaultPoolInvalid,
    /// Non-empty pools cannot be deleted
    DeleteNonEmptyPoolInvalid,
    /// The domain name is not configured for use as the dedicated IP's custom reverse DNS
    CustomDnsInvalid,
    /// A custom DNS change for this dedicated IP is currently pending
    CustomDnsPendingInvalid,
    /// Custom metadata field limit reached
    MetadataFieldLimit,
    /// The provided metadata field name does not exist
    MetadataFieldUnknown,
    /// Unmapped error name or malformed error envelope
    Unexpected,
}

/// Server error names and the kind each one maps to
pub const ERROR_NAME_TABLE: &[(&str, ApiErrorKind)] = &[
    ("ValidationError", ApiErrorKind::ValidationError),
    ("Invalid_Key", ApiErrorKind::KeyInvalid),
    ("PaymentRequired", ApiErrorKind::PaymentRequired),
    ("Unknown_Subaccount", ApiErrorKind::SubaccountUnknown),
    ("Unknown_Template", ApiErrorKind::TemplateUnknown),
    ("ServiceUnavailable", ApiErrorKind::ServiceUnavailable),
    ("Unknown_Message", ApiErrorKind::MessageUnknown),
    ("Invalid_Tag_Name", ApiErrorKind::TagNameInvalid),
    ("Invalid_Reject", ApiErrorKind::RejectInvalid),
    ("Unknown_Sender", ApiErrorKind::SenderUnknown),
    ("Unknown_Url", ApiErrorKind::UrlUnknown),
    ("Unknown_TrackingDomain", ApiErrorKind::TrackingDomainUnknown),
    ("Invalid_Template", ApiErrorKind::TemplateInvalid),
    ("Unknown_Webhook", ApiErrorKind::WebhookUnknown),
    ("Unknown_InboundDomain", ApiErrorKind::InboundDomainUnknown),
    ("Unknown_InboundRoute", ApiErrorKind::InboundRouteUnknown),
    ("Unknown_Export", ApiErrorKind::ExportUnknown),
    ("IP_ProvisionLimit", ApiErrorKind::IpProvisionLimit),
    ("Unknown_Pool", ApiErrorKind::PoolUnknown),
    ("NoSendingHistory", ApiErrorKind::NoSendingHistory),
    ("PoorReputation", ApiErrorKind::PoorReputation),
    ("Unknown_IP", ApiErrorKind::IpUnknown),
    ("Invalid_EmptyDefaultPool", ApiErrorKind::EmptyDefaultPoolInvalid),
    ("Invalid_DeleteDefaultPool", ApiErrorKind::DeleteDefaultPoolInvalid),
    ("Invalid_DeleteNonEmptyPool", ApiErrorKind::DeleteNonEmptyPoolInvalid),
    ("Invalid_CustomDNS", ApiErrorKind::CustomDnsInvalid),
    ("Invalid_CustomDNSPending", ApiErrorKind::CustomDnsPendingInvalid),
    ("Metadata_FieldLimit", ApiErrorKind::MetadataFieldLimit),
    ("Unknown_MetadataField", ApiErrorKind::MetadataFieldUnknown),
];

impl ApiErrorKind {
    /// Look up the kind for a server-supplied error name
    pub fn from_name(name: &str) -> Option<Self> {
        ERROR_NAME_TABLE
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, kind)| *kind)
    }

    /// Name of the kind as exposed by the API documentation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "ValidationError",
            Self::KeyInvalid => "KeyInvalid",
            Self::PaymentRequired => "PaymentRequired",
            Self::SubaccountUnknown => "SubaccountUnknown",
            Self::TemplateUnknown => "TemplateUnknown",
            Self::ServiceUnavailable => "ServiceUnavailable",
            Self::MessageUnknown => "MessageUnknown",
            Self::TagNameInvalid => "TagNameInvalid",
            Self::RejectInvalid => "RejectInvalid",
            Self::SenderUnknown => "SenderUnknown",
            Self::UrlUnknown => "UrlUnknown",
            Self::TrackingDomainUnknown => "TrackingDomainUnknown",
            Self::TemplateInvalid => "TemplateInvalid",
            Self::WebhookUnknown => "WebhookUnknown",
            Self::InboundDomainUnknown => "InboundDomainUnknown",
            Self::InboundRouteUnknown => "InboundRouteUnknown",
            Self::ExportUnknown => "ExportUnknown",
            Self::IpProvisionLimit => "IPProvisionLimit",
            Self::PoolUnknown => "PoolUnknown",
            Self::NoSendingHistory => "NoSendingHistory",
            Self::PoorReputation => "PoorReputation",
            Self::IpUnknown => "IPUnknown",
            Self::EmptyDefaultPoolInvalid => "EmptyDefaultPoolInvalid",
            Self::DeleteDefaultPoolInvalid => "DeleteDefaultPoolInvalid",
            Self::DeleteNonEmptyPoolInvalid => "DeleteNonEmptyPoolInvalid",
            Self::CustomDnsInvalid => "CustomDNSInvalid",
            Self::CustomDnsPendingInvalid => "CustomDNSPendingInvalid",
            Self::MetadataFieldLimit => "MetadataFieldLimit",
            Self::MetadataFieldUnknown => "MetadataFieldUnknown",
            Self::Unexpected => "ServerUnexpectedError",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
