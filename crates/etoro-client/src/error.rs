//! # Client Error Types
//!
//! Unified error handling for the gateway client and the operations built on it.

use thiserror::Error;

use crate::gateway::ResponseBody;

/// Client operation result type
pub type ClientResult<T> = Result<T, ClientError>;

/// Comprehensive error types for client operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// The exchange could not complete (DNS, connect, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A response was received but carried a non-2xx status.
    #[error("Request failed: {status} {status_text}")]
    Api {
        status: u16,
        status_text: String,
        body: ResponseBody,
    },

    #[error("JSON serialization/deserialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Position {position_id} not found in portfolio")]
    PositionNotFound { position_id: i64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid response: {field} - {reason}")]
    InvalidResponse { field: String, reason: String },
}

impl ClientError {
    /// Create an API error from a received response
    pub fn api_error(status: u16, status_text: impl Into<String>, body: ResponseBody) -> Self {
        Self::Api {
            status,
            status_text: status_text.into(),
            body,
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an argument-level rejection
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an invalid response error for a 2xx body of unexpected shape
    pub fn invalid_response(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// HTTP status of an API error, if this is one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when no response was received at all.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Http(_))
    }

    /// Check if error is recoverable (worth retrying by the caller)
    ///
    /// The gateway never retries on its own; this only classifies.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            ClientError::Http(e) => e.is_timeout() || e.is_connect(),
            ClientError::Api { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
