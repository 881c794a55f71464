//! Directory API error types.

use thiserror::Error;

/// Result type for directory API calls.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur when talking to the directory API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, TLS, timeout or other transport failure.
    #[error("http request failed: {0}")]
    Transport(#[from] ureq::Error),

    /// Server answered with a non-success status.
    #[error("api error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The call needs a logged-in session.
    #[error("not logged in")]
    Unauthenticated,
}

impl ApiError {
    /// The server-provided `message`, if the error carried one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}
