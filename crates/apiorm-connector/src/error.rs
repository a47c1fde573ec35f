//! Error types for the connector
//!
//! Every failure is fatal to the call that raised it: nothing is retried and
//! no record is modified by a failed call.

use apiorm_model::ModelError;
use apiorm_route::RouteError;
use std::path::PathBuf;

/// Main connector error type
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    /// No route for `(model, action)`; raised before any network call
    #[error("no route for {model}#{action}")]
    RouteNotFound {
        /// Model name
        model: String,
        /// Action name
        action: String,
    },

    /// HTTP request failed
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Response body is not JSON
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// Identifier cannot be substituted into the URL
    #[error("invalid identifier for {model}: {value}")]
    InvalidIdentifier {
        /// Model name
        model: String,
        /// Offending identifier
        value: serde_json::Value,
    },

    /// Response decoded but its shape does not fit the operation
    #[error("unexpected response for {action}: expected {expected}")]
    UnexpectedResponse {
        /// Action name
        action: String,
        /// What the operation needed
        expected: &'static str,
    },
}

impl ConnectorError {
    /// Create route miss error
    #[inline]
    pub fn route_not_found(model: impl Into<String>, action: impl Into<String>) -> Self {
        Self::RouteNotFound {
            model: model.into(),
            action: action.into(),
        }
    }

    /// Create unexpected response error
    #[inline]
    pub fn unexpected(action: impl Into<String>, expected: &'static str) -> Self {
        Self::UnexpectedResponse {
            action: action.into(),
            expected,
        }
    }

    /// Did the failure happen before the request was sent?
    #[inline]
    #[must_use]
    pub fn is_before_dispatch(&self) -> bool {
        matches!(
            self,
            Self::RouteNotFound { .. } | Self::InvalidIdentifier { .. }
        )
    }
}

impl From<ModelError> for ConnectorError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::InvalidIdentifier { model, value } => {
                Self::InvalidIdentifier { model, value }
            }
            ModelError::NotAnObject { .. } => Self::unexpected("record", "a JSON object"),
        }
    }
}

/// HTTP transport errors
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection, timeout or protocol failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("http status {status}: {body}")]
    Status {
        /// Status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Failure reported by a custom transport
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Status code, when the server answered
    #[inline]
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            Self::Other(_) => None,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config is not valid TOML for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Resource definition rejected
    #[error("route error: {0}")]
    Route(#[from] RouteError),

    /// Semantically invalid config
    #[error("configuration error: {0}")]
    Invalid(String),

    /// HTTP client could not be built
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}
