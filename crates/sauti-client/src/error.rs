//! Transport error types.

use thiserror::Error;

/// Errors raised while fetching from or decoding the remote API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The request could not be completed.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message taken from the response body, or the status reason.
        message: String,
    },

    /// The response body carried an explicit `error` field.
    #[error("server error: {0}")]
    Server(String),

    /// The response body did not have the expected shape.
    #[error("failed to decode {what}: {source}")]
    Decode {
        /// What was being decoded.
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl TransportError {
    /// Returns a user-friendly error message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => {
                "Could not reach the market price service. Please check your connection.".into()
            }
            Self::Status { status, message } if message.is_empty() => {
                format!("The market price service returned an error ({status}).")
            }
            Self::Status { message, .. } | Self::Server(message) => message.clone(),
            Self::Decode { .. } => "The market price service sent an unexpected response.".into(),
        }
    }

    /// Returns whether a manual retry could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::Server(_) | Self::Decode { .. } => false,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Result type alias for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;
