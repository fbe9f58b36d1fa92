//! Persistence error types.
//!
//! All persistence operations return structured errors that provide
//! user-friendly messages and optional remediation hints.

use std::path::PathBuf;

use thiserror::Error;

use crate::keys::StoreKey;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("Failed to {operation} store file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete write of store key")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("Failed to serialize value")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// A stored value is not valid JSON of the expected shape.
    #[error("Failed to deserialize store key {key}")]
    Deserialization {
        key: StoreKey,
        #[source]
        source: serde_json::Error,
    },

    /// A stored value parsed but violates a domain rule.
    #[error("Store key {key} is corrupt: {reason}")]
    Corrupt { key: StoreKey, reason: String },
}

impl PersistenceError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the session file at {}", operation, path.display())
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the session to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
            Self::Serialization { .. } => {
                "An error occurred while saving the session.".to_string()
            }
            Self::Deserialization { key, .. } | Self::Corrupt { key, .. } => {
                format!("The saved session entry '{key}' could not be read.")
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that you have permission to read the state directory.".into())
                } else {
                    Some("Check that you have permission to write to the state directory.".into())
                }
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or choose a different state directory.".into())
            }
            Self::Serialization { .. } => None,
            Self::Deserialization { .. } | Self::Corrupt { .. } => {
                Some("Reset the search to start a fresh session.".into())
            }
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
