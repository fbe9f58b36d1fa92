//! Durable store keys.

use std::fmt;

/// The five keys a grid session writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StoreKey {
    /// Last compiled request URL.
    Query,
    /// Cursor tokens and page count.
    Page,
    /// Last raw response payload.
    Data,
    /// Cached row page.
    RowData,
    /// Serialized date range.
    Dates,
}

impl StoreKey {
    pub const ALL: [Self; 5] = [
        Self::Query,
        Self::Page,
        Self::Data,
        Self::RowData,
        Self::Dates,
    ];

    /// Key name in the store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "q",
            Self::Page => "page",
            Self::Data => "data",
            Self::RowData => "rowdata",
            Self::Dates => "dates",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
