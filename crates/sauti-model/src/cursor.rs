//! Server-issued pagination cursor.

use serde::{Deserialize, Serialize};

/// Opaque pagination tokens plus the page count, exactly as the server sent them.
///
/// `next` and `prev` are pointers, not offsets. Apart from the `next - 1`
/// page boundary nothing is derived from them locally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cursor {
    #[serde(default)]
    pub next: Option<u64>,
    #[serde(default)]
    pub prev: Option<u64>,
    #[serde(default)]
    pub page_count: Option<u64>,
}

impl Cursor {
    #[must_use]
    pub const fn new(next: Option<u64>, prev: Option<u64>, page_count: Option<u64>) -> Self {
        Self {
            next,
            prev,
            page_count,
        }
    }

    /// True when no token and no page count have been learned yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.next.is_none() && self.prev.is_none() && self.page_count.is_none()
    }
}
