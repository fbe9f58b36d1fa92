//! Busy indicator labels.

use std::fmt;

/// Why the grid is busy. Each reason carries the label shown while it lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyReason {
    /// Fetching the filter option catalogue.
    LoadingOptions,
    /// Fetching a page of rows.
    GettingData,
    /// Resolving the export download.
    Exporting,
}

impl BusyReason {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LoadingOptions => "One moment please...",
            Self::GettingData => "Getting data...",
            Self::Exporting => "This may take a while, please wait...",
        }
    }
}

impl fmt::Display for BusyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
