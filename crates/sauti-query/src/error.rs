//! Query compilation errors.

use thiserror::Error;

/// Errors raised while resolving or restoring request URLs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The configured API base is not a usable http(s) URL.
    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidBase { url: String, reason: String },

    /// A persisted request URL could not be parsed.
    #[error("invalid persisted query {query:?}: {reason}")]
    InvalidPersisted { query: String, reason: String },

    /// Joining an endpoint path onto the base failed.
    #[error("failed to resolve endpoint {path}: {reason}")]
    Join { path: &'static str, reason: String },
}

impl QueryError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidBase { url, .. } => {
                format!("The API address '{url}' is not valid. Check the configuration.")
            }
            Self::InvalidPersisted { .. } => {
                "The saved search could not be read. Reset the search to continue.".to_string()
            }
            Self::Join { .. } => "An unexpected error occurred.".to_string(),
        }
    }
}

/// Result type alias for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
