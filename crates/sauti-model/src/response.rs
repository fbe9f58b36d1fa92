//! Decoded paged responses from the client endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cursor::Cursor;

/// One grid row. The controller never looks inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowRecord(pub Value);

impl RowRecord {
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for RowRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// `{records, next, prev, pageCount}` as returned by `GET <base>/client/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    #[serde(default)]
    pub records: Vec<RowRecord>,
    #[serde(default)]
    pub next: Option<u64>,
    #[serde(default)]
    pub prev: Option<u64>,
    #[serde(default)]
    pub page_count: Option<u64>,
}

impl PageResponse {
    /// The cursor carried by this response.
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        Cursor::new(self.next, self.prev, self.page_count)
    }
}
