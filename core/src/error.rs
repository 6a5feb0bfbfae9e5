//! Error types for the transaction API client.
//!
//! # Design
//! Every failure of a client call reaches the caller as a [`ClientError`].
//! Anything the client can describe in HTTP terms is an [`ApiError`]:
//! a non-2xx response, a 2xx response whose body is not the expected JSON,
//! or a request that never got a response at all. The last one is kept as
//! its own variant so callers can tell "the server said no" apart from "the
//! server was unreachable", while still reporting status `0` for it.
//! A missing resource is an ordinary `Http` error with status 404.

use thiserror::Error;

/// Status reported for requests that never received a response.
pub const NETWORK_ERROR_STATUS: u16 = 0;
/// Status text reported for requests that never received a response.
pub const NETWORK_ERROR_STATUS_TEXT: &str = "Network Error";
/// Message reported for requests that never received a response.
pub const NETWORK_ERROR_MESSAGE: &str = "Connection error: could not reach the server";
/// Message reported when a 2xx body cannot be parsed.
pub const INVALID_JSON_MESSAGE: &str = "Failed to parse the server's JSON response";

/// Structured error normalized from an HTTP exchange.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// A response arrived but was either non-2xx or unparseable.
    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        status_text: String,
        message: String,
        /// Parsed JSON error body, when the server sent one.
        payload: Option<serde_json::Value>,
    },

    /// No response was received (DNS failure, connection refused, reset).
    #[error("{message}")]
    Network { message: String },
}

impl ApiError {
    pub(crate) fn network() -> Self {
        ApiError::Network {
            message: NETWORK_ERROR_MESSAGE.to_string(),
        }
    }

    /// HTTP status code, `0` for network failures.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Http { status, .. } => *status,
            ApiError::Network { .. } => NETWORK_ERROR_STATUS,
        }
    }

    pub fn status_text(&self) -> &str {
        match self {
            ApiError::Http { status_text, .. } => status_text,
            ApiError::Network { .. } => NETWORK_ERROR_STATUS_TEXT,
        }
    }

    /// Human-readable message resolved from the response.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Http { message, .. } | ApiError::Network { message } => message,
        }
    }

    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            ApiError::Http { payload, .. } => payload.as_ref(),
            ApiError::Network { .. } => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }
}

/// Error returned by every `TransactionService` call.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Anything outside the HTTP exchange, such as a request body that
    /// could not be serialized or a fetch task that panicked.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl ClientError {
    /// The structured error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(err) => Some(err),
            ClientError::Unexpected(_) => None,
        }
    }
}

/// Failure to obtain any response from the remote end.
#[derive(Debug, Clone, Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);
