//! Validation errors for filter edits.

use chrono::NaiveDate;
use thiserror::Error;

/// A filter edit that was rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The range starts after it ends.
    #[error("date range starts on {start} but ends on {end}")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },

    /// The range ends after the current date.
    #[error("date range ends on {end}, after today ({today})")]
    EndInFuture { end: NaiveDate, today: NaiveDate },

    /// Currency codes are three ASCII letters.
    #[error("invalid currency code: {0:?}")]
    InvalidCurrency(String),

    /// A date string that is not `YYYY-MM-DD`.
    #[error("invalid date: {0:?}")]
    InvalidDate(String),
}

impl ValidationError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::StartAfterEnd { .. } => "The start date must not be after the end date.".into(),
            Self::EndInFuture { .. } => "The end date cannot be later than today.".into(),
            Self::InvalidCurrency(code) => format!("'{code}' is not a valid currency code."),
            Self::InvalidDate(value) => {
                format!("'{value}' is not a valid date. Use the YYYY-MM-DD format.")
            }
        }
    }
}

/// Result type alias for filter validation.
pub type Result<T> = std::result::Result<T, ValidationError>;
