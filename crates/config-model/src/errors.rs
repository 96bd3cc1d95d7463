//! Error taxonomy for the configuration access client.
//!
//! Every operation resolves to either its payload or a [`ClientError`]. The
//! client never recovers locally: an error is logged once by the interceptor
//! pipeline and then returned to the caller unchanged.
//!
//! Two failure classes come from the network:
//!
//! - **Transport-level** ([`ClientError::Transport`]): no HTTP status is
//!   available (timeout, DNS failure, connection refused).
//! - **HTTP-level** ([`ClientError::Http`]): the server answered with a
//!   non-success status.
//!
//! The remaining variants cover local failures (decoding, request
//! construction, startup configuration) and service-level rejections carried
//! inside a successful HTTP response.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while addressing or retrieving configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("transport error: {message}")]
    Transport {
        /// Message reported by the underlying HTTP stack.
        message: String,
        /// `true` if the fixed request timeout elapsed.
        timed_out: bool,
    },

    /// The server answered with a non-success status code.
    #[error("HTTP {status}: {message}")]
    Http {
        /// Numeric HTTP status code (e.g. `404`).
        status: u16,
        /// Response body text, or the canonical reason phrase when the body is empty.
        message: String,
    },

    /// A success response could not be decoded into the requested shape.
    #[error("failed to decode response body: {message}")]
    Decode {
        /// Description of the decoding problem.
        message: String,
    },

    /// The outbound request descriptor cannot be dispatched.
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Description of what is wrong with the request.
        message: String,
    },

    /// Client configuration is invalid (e.g. a malformed base URL).
    ///
    /// Produced at construction time; a client never starts with an invalid config.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// The service returned a result envelope whose code signals failure.
    #[error("request rejected by service (code {code}): {message}")]
    Rejected {
        /// Service result code (see [`crate::ResultCode`]).
        code: i32,
        /// Message carried in the envelope.
        message: String,
    },
}

impl ClientError {
    /// Returns the HTTP status for HTTP-level failures, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the request timed out before a response arrived.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { timed_out: true, .. })
    }

    /// Returns the human-readable message carried by the error.
    pub fn message(&self) -> &str {
        match self {
            Self::Transport { message, .. }
            | Self::Http { message, .. }
            | Self::Decode { message }
            | Self::InvalidRequest { message }
            | Self::Configuration { message }
            | Self::Rejected { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_http_failures_carry_a_status() {
        let http = ClientError::Http {
            status: 404,
            message: "Not Found".into(),
        };
        assert_eq!(http.status(), Some(404));

        let timeout = ClientError::Transport {
            message: "operation timed out".into(),
            timed_out: true,
        };
        assert_eq!(timeout.status(), None);
        assert!(timeout.is_timeout());

        let rejected = ClientError::Rejected {
            code: 404,
            message: "missing key".into(),
        };
        assert_eq!(rejected.status(), None);
        assert!(!rejected.is_timeout());
    }

    #[test]
    fn display_includes_status_and_message() {
        let err = ClientError::Http {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
        assert_eq!(err.message(), "Service Unavailable");
    }
}
