//! Client error types and failure classification helpers.

use std::time::Duration;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by the client.
///
/// Exactly one of these reaches the caller per failed call; intermediate
/// retry attempts are absorbed by the retry loop and visible only through
/// the observer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response arrived within the attempt's timeout budget.
    #[error("request timed out after {budget:?}")]
    Timeout {
        /// The per-attempt budget that was exhausted.
        budget: Duration,
    },

    /// The server answered with a non-success status.
    #[error("api error {status} {status_text}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status.
        status_text: String,
        /// Error body, when the server sent a parseable one.
        payload: Option<ErrorPayload>,
        /// Human-readable message derived from the payload or status text.
        message: String,
    },

    /// The request never produced a response (DNS failure, connection
    /// reset, interrupted body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A JSON body failed to decode as the expected type (or a request
    /// body failed to serialize).
    #[error("json error: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request path could not be joined onto the configured base URL.
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    /// Build an `Api` error from a status code and an optional error body.
    ///
    /// The message prefers `payload.message`, then `payload.detail`, then
    /// the status reason phrase.
    pub fn api(status: StatusCode, payload: Option<ErrorPayload>) -> Self {
        let status_text = status
            .canonical_reason()
            .unwrap_or("Unknown Status")
            .to_string();
        let message = payload
            .as_ref()
            .and_then(|p| p.message.clone().or_else(|| p.detail.clone()))
            .unwrap_or_else(|| status_text.clone());

        Self::Api {
            status: status.as_u16(),
            status_text,
            payload,
            message,
        }
    }

    /// Check if this error is eligible for another attempt.
    ///
    /// Server errors (>= 500) and transport failures are retryable. A
    /// timeout is not: the attempt already consumed its full budget, and
    /// retrying would silently multiply user-visible latency.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Check if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Get the HTTP status code if this is an API error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error body shape read opportunistically from non-success responses.
///
/// Servers are not required to send this; any other shape degrades to the
/// status reason phrase rather than failing resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Primary error message.
    pub message: Option<String>,
    /// Secondary detail, used when no message is present.
    pub detail: Option<String>,
}
