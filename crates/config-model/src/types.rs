//! Shared value types for configuration access.
//!
//! [`ConfigCoordinate`] addresses one configuration document. [`Payload`] is
//! what a successful call resolves to before an API surface narrows it. The
//! remaining types describe the documents the configuration service returns
//! inside its JSON result envelope.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ApplicationName, ClientError, Label, ProfileName};

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

/// Identifies exactly one configuration document server-side.
///
/// The label defaults to `"main"` when not set explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigCoordinate {
    application: ApplicationName,
    profile: ProfileName,
    label: Label,
}

impl ConfigCoordinate {
    /// Creates a coordinate on the default `"main"` label.
    pub fn new(application: ApplicationName, profile: ProfileName) -> Self {
        Self {
            application,
            profile,
            label: Label::default(),
        }
    }

    /// Returns the same coordinate on a different label.
    #[must_use]
    pub fn with_label(mut self, label: Label) -> Self {
        self.label = label;
        self
    }

    /// Builds a coordinate from raw strings.
    ///
    /// A `None` or empty `label` selects `"main"`. Empty application or
    /// profile names are rejected with [`ClientError::InvalidRequest`].
    pub fn from_parts(
        application: &str,
        profile: &str,
        label: Option<&str>,
    ) -> Result<Self, ClientError> {
        let application =
            ApplicationName::new(application).ok_or_else(|| ClientError::InvalidRequest {
                message: "application name must not be empty".to_string(),
            })?;
        let profile = ProfileName::new(profile).ok_or_else(|| ClientError::InvalidRequest {
            message: "profile name must not be empty".to_string(),
        })?;
        let label = label.and_then(Label::new).unwrap_or_default();
        Ok(Self::new(application, profile).with_label(label))
    }

    /// Returns the application name.
    pub fn application(&self) -> &ApplicationName {
        &self.application
    }

    /// Returns the profile name.
    pub fn profile(&self) -> &ProfileName {
        &self.profile
    }

    /// Returns the label.
    pub fn label(&self) -> &Label {
        &self.label
    }
}

impl std::fmt::Display for ConfigCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.application, self.profile, self.label)
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// How the body of a success response is handled.
///
/// Chosen per call. The transport default is [`ContentHandling::ParseJson`];
/// native-format calls opt out with [`ContentHandling::PassthroughText`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentHandling {
    /// Parse the body as JSON.
    #[default]
    ParseJson,
    /// Return the body as text without parsing it.
    PassthroughText,
}

/// The unwrapped body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Parsed JSON document.
    Json(Value),
    /// Raw response text, byte-for-byte as received.
    Text(String),
}

impl Payload {
    /// Returns the JSON value, failing for text payloads.
    pub fn into_json(self) -> Result<Value, ClientError> {
        match self {
            Self::Json(value) => Ok(value),
            Self::Text(_) => Err(ClientError::Decode {
                message: "expected a JSON payload, received raw text".to_string(),
            }),
        }
    }

    /// Returns the raw text, failing for JSON payloads.
    pub fn into_text(self) -> Result<String, ClientError> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Json(_) => Err(ClientError::Decode {
                message: "expected a raw text payload, received JSON".to_string(),
            }),
        }
    }

    /// Deserializes a JSON payload into `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ClientError> {
        let value = self.into_json()?;
        serde_json::from_value(value).map_err(|e| ClientError::Decode {
            message: e.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Service envelope
// ---------------------------------------------------------------------------

/// Result codes used by the configuration service inside its envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    Success,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    Conflict,
    UnprocessableEntity,
    TooManyRequests,
    InternalServerError,
    NotImplemented,
    BadGateway,
    ServiceUnavailable,
    GatewayTimeout,
    BusinessError,
    ValidationError,
    DuplicateKeyError,
    ConfigError,
    DatabaseError,
    CacheError,
    NetworkError,
}

impl ResultCode {
    const ALL: [ResultCode; 21] = [
        Self::Success,
        Self::BadRequest,
        Self::Unauthorized,
        Self::Forbidden,
        Self::NotFound,
        Self::MethodNotAllowed,
        Self::Conflict,
        Self::UnprocessableEntity,
        Self::TooManyRequests,
        Self::InternalServerError,
        Self::NotImplemented,
        Self::BadGateway,
        Self::ServiceUnavailable,
        Self::GatewayTimeout,
        Self::BusinessError,
        Self::ValidationError,
        Self::DuplicateKeyError,
        Self::ConfigError,
        Self::DatabaseError,
        Self::CacheError,
        Self::NetworkError,
    ];

    /// Looks up a known code. Unknown codes return `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Returns the numeric code.
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 200,
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::Conflict => 409,
            Self::UnprocessableEntity => 422,
            Self::TooManyRequests => 429,
            Self::InternalServerError => 500,
            Self::NotImplemented => 501,
            Self::BadGateway => 502,
            Self::ServiceUnavailable => 503,
            Self::GatewayTimeout => 504,
            Self::BusinessError => 1000,
            Self::ValidationError => 1001,
            Self::DuplicateKeyError => 1002,
            Self::ConfigError => 2000,
            Self::DatabaseError => 2001,
            Self::CacheError => 2002,
            Self::NetworkError => 2003,
        }
    }

    /// Returns the service's canonical message for this code.
    pub fn message(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::BadRequest => "Bad Request",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not Found",
            Self::MethodNotAllowed => "Method Not Allowed",
            Self::Conflict => "Conflict",
            Self::UnprocessableEntity => "Unprocessable Entity",
            Self::TooManyRequests => "Too Many Requests",
            Self::InternalServerError => "Internal Server Error",
            Self::NotImplemented => "Not Implemented",
            Self::BadGateway => "Bad Gateway",
            Self::ServiceUnavailable => "Service Unavailable",
            Self::GatewayTimeout => "Gateway Timeout",
            Self::BusinessError => "Business Error",
            Self::ValidationError => "Validation Error",
            Self::DuplicateKeyError => "Duplicate Key Error",
            Self::ConfigError => "Configuration Error",
            Self::DatabaseError => "Database Error",
            Self::CacheError => "Cache Error",
            Self::NetworkError => "Network Error",
        }
    }
}

impl std::fmt::Display for ResultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code(), self.message())
    }
}

// ---------------------------------------------------------------------------

/// The `{code, message, data, timestamp}` envelope the service wraps around
/// every normalized API response.
///
/// The service reports some failures with HTTP 200 and a non-success `code`;
/// [`ApiResult::into_data`] surfaces those as [`ClientError::Rejected`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResult<T> {
    /// Service result code (`200` on success).
    pub code: i32,
    /// Human-readable message accompanying the code.
    pub message: Option<String>,
    /// Payload; absent for acknowledgements without data and for failures.
    pub data: Option<T>,
    /// Server time at which the envelope was produced.
    pub timestamp: Option<Timestamp>,
}

impl<T: DeserializeOwned> ApiResult<T> {
    /// Deserializes an envelope from a JSON value returned by the client.
    pub fn from_value(value: Value) -> Result<Self, ClientError> {
        serde_json::from_value(value).map_err(|e| ClientError::Decode {
            message: e.to_string(),
        })
    }
}

impl<T> ApiResult<T> {
    /// Returns `true` if the envelope carries the success code.
    pub fn is_success(&self) -> bool {
        self.code == ResultCode::Success.code()
    }

    /// Returns the known [`ResultCode`] for this envelope, if any.
    pub fn result_code(&self) -> Option<ResultCode> {
        ResultCode::from_code(self.code)
    }

    /// Unwraps the payload, turning a non-success code into [`ClientError::Rejected`].
    pub fn into_data(self) -> Result<Option<T>, ClientError> {
        if self.is_success() {
            return Ok(self.data);
        }
        let message = match (self.message, ResultCode::from_code(self.code)) {
            (Some(message), _) => message,
            (None, Some(known)) => known.message().to_string(),
            (None, None) => "unknown error".to_string(),
        };
        Err(ClientError::Rejected {
            code: self.code,
            message,
        })
    }
}

// ---------------------------------------------------------------------------
// Service documents
// ---------------------------------------------------------------------------

/// Merged configuration for one coordinate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigProperty {
    pub application: Option<String>,
    pub profile: Option<String>,
    pub label: Option<String>,
    /// Flattened property keys mapped to their resolved values.
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
    /// Name of the source the properties were resolved from.
    pub source: Option<String>,
    /// Repository version (commit) the properties were read at.
    pub version: Option<String>,
}

/// One configuration file contributing to a merged configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    pub application: Option<String>,
    pub profile: Option<String>,
    pub label: Option<String>,
    pub file_name: Option<String>,
    pub content: Option<String>,
    pub path: Option<String>,
    pub commit_message: Option<String>,
}

/// Health report of the configuration service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `"UP"` when the service is healthy.
    pub status: String,
    pub service: Option<String>,
    pub timestamp: Option<Timestamp>,
}

impl HealthStatus {
    /// Returns `true` if the service reports itself as up.
    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case("up")
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp, serialized as epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(#[serde(with = "chrono::serde::ts_milliseconds")] DateTime<Utc>);

impl Timestamp {
    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
