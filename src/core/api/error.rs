//! Error types for the launch backend client.

use thiserror::Error;

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors surfaced by [`LaunchApi`](super::LaunchApi) operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (DNS, TLS, connection reset, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: u16,
        /// `message` field of the error body, when the backend sent one.
        message: Option<String>,
    },

    /// The body was not valid JSON for the expected record.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The body was JSON, but none of the accepted shapes.
    #[error("Unexpected response shape for {endpoint}: {detail}")]
    UnexpectedShape { endpoint: &'static str, detail: String },

    /// The configured base URL cannot be joined with an endpoint path.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Creates a status error from a code and optional server message.
    #[must_use]
    pub fn status(status: u16, message: Option<String>) -> Self {
        Self::Status { status, message }
    }

    /// HTTP status code, for status errors and transport errors that carry one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message the backend put in its error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref().filter(|m| !m.trim().is_empty()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}
