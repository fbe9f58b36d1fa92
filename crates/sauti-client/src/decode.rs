//! Payload decoding for the client endpoints.

use sauti_model::{PageResponse, Superlist};
use serde_json::Value;

use crate::error::{Result, TransportError};

/// The explicit `error` field of a response body, if it carries one.
///
/// A string is used as-is; an object contributes its `message` field.
#[must_use]
pub fn server_error(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) => Some(message.clone()),
        other => Some(
            other
                .get("message")
                .and_then(Value::as_str)
                .map_or_else(|| other.to_string(), str::to_string),
        ),
    }
}

/// Decode `{records, next, prev, pageCount}`.
pub fn decode_page(body: &Value) -> Result<PageResponse> {
    decode(body, "page response")
}

/// Decode the filter option catalogue.
pub fn decode_superlist(body: &Value) -> Result<Superlist> {
    decode(body, "filter options")
}

fn decode<T: serde::de::DeserializeOwned>(body: &Value, what: &'static str) -> Result<T> {
    if let Some(message) = server_error(body) {
        return Err(TransportError::Server(message));
    }
    T::deserialize(body).map_err(|source| TransportError::Decode { what, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sauti_model::{Cursor, Dimension};
    use serde_json::json;

    #[test]
    fn error_field_variants() {
        assert_eq!(server_error(&json!({"error": "bad token"})).as_deref(), Some("bad token"));
        assert_eq!(
            server_error(&json!({"error": {"message": "expired"}})).as_deref(),
            Some("expired")
        );
        assert_eq!(server_error(&json!({"error": null, "records": []})), None);
        assert_eq!(server_error(&json!({"records": []})), None);
        assert_eq!(server_error(&json!("https://example.org/file.csv")), None);
    }

    #[test]
    fn decodes_page() {
        let page = decode_page(&json!({
            "records": [{"market": "Busia"}],
            "next": 5,
            "prev": 3,
            "pageCount": 10
        }))
        .unwrap();
        assert_eq!(page.cursor(), Cursor::new(Some(5), Some(3), Some(10)));
        assert_eq!(page.records.len(), 1);
    }

    #[test]
    fn page_with_error_field_is_a_server_error() {
        let err = decode_page(&json!({"error": "Invalid date"})).unwrap_err();
        assert!(matches!(err, TransportError::Server(ref m) if m == "Invalid date"));
    }

    #[test]
    fn wrong_shape_is_a_decode_error() {
        let err = decode_page(&json!({"records": "nope"})).unwrap_err();
        assert!(matches!(err, TransportError::Decode { what: "page response", .. }));
    }

    #[test]
    fn decodes_superlist() {
        let list = decode_superlist(&json!({
            "countries": [{"country": "KEN"}, {"country": "UGA"}],
            "products": [{"product": "Maize"}]
        }))
        .unwrap();
        assert_eq!(list.options(Dimension::Countries), ["KEN", "UGA"]);
        assert_eq!(list.options(Dimension::Products), ["Maize"]);
        assert!(list.options(Dimension::Markets).is_empty());
    }
}
