//! Session error types.

use sauti_client::TransportError;
use sauti_model::ValidationError;
use sauti_persistence::PersistenceError;
use sauti_query::QueryError;
use thiserror::Error;

use crate::busy::BusyReason;

/// Everything a controller operation can fail with.
///
/// Each variant maps to one user-visible message through
/// [`SessionError::user_message`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    /// The request could not be completed.
    #[error("network failure: {0}")]
    Network(String),

    /// The server answered with an error.
    #[error("server error: {message}")]
    Server {
        /// HTTP status, when the failure came from one.
        status: Option<u16>,
        message: String,
    },

    /// A filter value was rejected before any request was built.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A pagination fetch is already in flight.
    #[error("busy: {}", .0.label())]
    Busy(BusyReason),

    /// The navigation trigger is disabled at the current page.
    #[error("{0} is disabled at the current page")]
    Disabled(&'static str),

    /// Reading or writing the durable store failed.
    #[error(transparent)]
    Store(#[from] PersistenceError),

    /// A response or persisted value could not be decoded.
    #[error("codec error: {0}")]
    Codec(String),

    /// A request URL could not be built.
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl SessionError {
    /// The single message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => {
                "Could not reach the market price service. Please check your connection.".into()
            }
            Self::Server { message, .. } => message.clone(),
            Self::Validation(err) => err.user_message(),
            Self::Busy(reason) => reason.label().to_string(),
            Self::Disabled(trigger) => format!("There is no {trigger} page."),
            Self::Store(err) => err.user_message(),
            Self::Codec(_) => "The market price service sent an unexpected response.".into(),
            Self::Query(err) => err.user_message(),
        }
    }

    /// Whether repeating the same trigger by hand could succeed.
    ///
    /// The controller itself never retries.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Busy(_) => true,
            Self::Server { status, .. } => status.is_some_and(|s| s >= 500 || s == 429),
            Self::Validation(_)
            | Self::Disabled(_)
            | Self::Store(_)
            | Self::Codec(_)
            | Self::Query(_) => false,
        }
    }
}

impl From<TransportError> for SessionError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Network(reason) => Self::Network(reason),
            TransportError::Status { status, message } => Self::Server {
                status: Some(status),
                message: if message.is_empty() {
                    format!("The market price service returned an error ({status}).")
                } else {
                    message
                },
            },
            TransportError::Server(message) => Self::Server {
                status: None,
                message,
            },
            other => Self::Codec(other.to_string()),
        }
    }
}

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_map_to_taxonomy() {
        let err = SessionError::from(TransportError::Network("refused".into()));
        assert!(matches!(err, SessionError::Network(_)));
        assert!(err.is_retryable());

        let err = SessionError::from(TransportError::Server("Invalid token".into()));
        assert_eq!(err.user_message(), "Invalid token");
        assert!(!err.is_retryable());

        let err = SessionError::from(TransportError::Status {
            status: 503,
            message: String::new(),
        });
        assert!(err.user_message().contains("503"));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_disabled_message() {
        assert_eq!(
            SessionError::Disabled("previous").user_message(),
            "There is no previous page."
        );
    }
}
