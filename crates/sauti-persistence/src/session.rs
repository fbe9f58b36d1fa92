//! Load, save and wipe of the persisted grid session.

use sauti_model::{Cursor, DateRange, RowRecord};
use serde_json::Value;

use crate::codec::{decode_date_range, deserialize, encode_date_range, serialize};
use crate::error::{PersistenceError, Result};
use crate::keys::StoreKey;
use crate::store::DurableStore;

/// Everything a reload restores.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedSession {
    /// Last request URL (`q`).
    pub query: Option<String>,
    /// Cursor tokens and page count (`page`).
    pub cursor: Option<Cursor>,
    /// Last raw response payload (`data`).
    pub data: Option<Value>,
    /// Cached row page (`rowdata`).
    pub rows: Vec<RowRecord>,
    /// Date range (`dates`).
    pub dates: Option<DateRange>,
}

impl PersistedSession {
    /// True when nothing was restored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Read every key of the session.
pub fn load_session(store: &impl DurableStore) -> Result<PersistedSession> {
    let query = read::<String>(store, StoreKey::Query)?;
    let data = read::<Value>(store, StoreKey::Data)?;
    let cursor = match read::<Value>(store, StoreKey::Page)? {
        Some(page @ Value::Object(_)) => Some(serde_json::from_value(page).map_err(|source| {
            PersistenceError::Deserialization {
                key: StoreKey::Page,
                source,
            }
        })?),
        // Older sessions kept only the page number here; the tokens live in `data`.
        Some(_) => data.as_ref().map(cursor_from_payload),
        None => None,
    };
    let rows = read::<Vec<RowRecord>>(store, StoreKey::RowData)?.unwrap_or_default();
    let dates = store
        .get(StoreKey::Dates)?
        .map(|text| decode_date_range(&text))
        .transpose()?;

    let session = PersistedSession {
        query,
        cursor,
        data,
        rows,
        dates,
    };
    tracing::debug!(
        has_query = session.query.is_some(),
        has_cursor = session.cursor.is_some(),
        rows = session.rows.len(),
        has_dates = session.dates.is_some(),
        "loaded persisted session"
    );
    Ok(session)
}

/// Persist a successfully fetched page: request URL, cursor, raw payload and rows.
///
/// The four keys change together. If any write fails, the keys already
/// written are put back to their previous values before the error returns.
pub fn store_page(
    store: &mut impl DurableStore,
    request_url: &str,
    cursor: &Cursor,
    payload: &Value,
    rows: &[RowRecord],
) -> Result<()> {
    let writes = [
        (StoreKey::Query, serialize(request_url)?),
        (StoreKey::Page, serialize(cursor)?),
        (StoreKey::Data, serialize(payload)?),
        (StoreKey::RowData, serialize(rows)?),
    ];
    let previous = writes
        .iter()
        .map(|(key, _)| store.get(*key))
        .collect::<Result<Vec<_>>>()?;

    for (written, (key, text)) in writes.iter().enumerate() {
        if let Err(err) = store.set(*key, text) {
            tracing::warn!(key = %key, %err, "page write failed, restoring previous keys");
            let restored = writes.iter().map(|(key, _)| *key).zip(&previous);
            rollback(store, restored.take(written));
            return Err(err);
        }
    }
    Ok(())
}

fn rollback<'a>(
    store: &mut impl DurableStore,
    keys: impl Iterator<Item = (StoreKey, &'a Option<String>)>,
) {
    for (key, previous) in keys {
        let outcome = match previous {
            Some(text) => store.set(key, text),
            None => store.remove(key),
        };
        if let Err(err) = outcome {
            tracing::error!(key = %key, %err, "could not restore key after a failed page write");
        }
    }
}

/// Persist only the cursor.
pub fn store_cursor(store: &mut impl DurableStore, cursor: &Cursor) -> Result<()> {
    store.set(StoreKey::Page, &serialize(cursor)?)
}

/// Persist the date range, or remove its record when `None`.
pub fn store_dates(store: &mut impl DurableStore, range: Option<&DateRange>) -> Result<()> {
    match range {
        Some(range) => store.set(StoreKey::Dates, &encode_date_range(range)?),
        None => store.remove(StoreKey::Dates),
    }
}

/// Remove every durable key.
pub fn wipe_session(store: &mut impl DurableStore) -> Result<()> {
    store.clear()?;
    tracing::info!("wiped persisted session");
    Ok(())
}

fn read<T: serde::de::DeserializeOwned>(
    store: &impl DurableStore,
    key: StoreKey,
) -> Result<Option<T>> {
    store
        .get(key)?
        .map(|text| deserialize(key, &text))
        .transpose()
}

fn cursor_from_payload(payload: &Value) -> Cursor {
    let field = |name: &str| payload.get(name).and_then(Value::as_u64);
    Cursor::new(field("next"), field("prev"), field("pageCount"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    #[test]
    fn empty_store_loads_empty_session() {
        let store = MemoryStore::new();
        assert!(load_session(&store).unwrap().is_empty());
    }

    #[test]
    fn page_round_trip() {
        let mut store = MemoryStore::new();
        let cursor = Cursor::new(Some(5), Some(3), Some(10));
        let rows = vec![RowRecord(json!({"market": "Busia"}))];
        let payload = json!({"records": [{"market": "Busia"}], "next": 5, "prev": 3, "pageCount": 10});

        store_page(
            &mut store,
            "https://api.example.org/sauti/client/?currency=USD&next=4",
            &cursor,
            &payload,
            &rows,
        )
        .unwrap();

        let session = load_session(&store).unwrap();
        assert_eq!(
            session.query.as_deref(),
            Some("https://api.example.org/sauti/client/?currency=USD&next=4")
        );
        assert_eq!(session.cursor, Some(cursor));
        assert_eq!(session.data, Some(payload));
        assert_eq!(session.rows, rows);
    }

    #[test]
    fn legacy_numeric_page_falls_back_to_payload_tokens() {
        let mut store = MemoryStore::new();
        store.set(StoreKey::Page, "4").unwrap();
        store
            .set(StoreKey::Data, r#"{"next":5,"prev":3,"pageCount":10,"records":[]}"#)
            .unwrap();
        let session = load_session(&store).unwrap();
        assert_eq!(session.cursor, Some(Cursor::new(Some(5), Some(3), Some(10))));
    }

    #[test]
    fn clearing_dates_removes_the_record() {
        let mut store = MemoryStore::new();
        let day = chrono::NaiveDate::from_ymd_opt(2022, 3, 14).unwrap();
        let range = DateRange::new(day, day).unwrap();
        store_dates(&mut store, Some(&range)).unwrap();
        assert_eq!(load_session(&store).unwrap().dates, Some(range));

        store_dates(&mut store, None).unwrap();
        assert_eq!(store.get(StoreKey::Dates).unwrap(), None);
    }

    /// Delegates to a memory store but refuses writes to one key.
    struct FailingOn {
        inner: MemoryStore,
        key: StoreKey,
    }

    impl DurableStore for FailingOn {
        fn get(&self, key: StoreKey) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: StoreKey, value: &str) -> Result<()> {
            if key == self.key {
                return Err(PersistenceError::Io {
                    operation: "write",
                    path: format!("{key}.json").into(),
                    source: std::io::Error::other("disk full"),
                });
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: StoreKey) -> Result<()> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn failed_page_write_restores_earlier_keys() {
        let mut inner = MemoryStore::new();
        let old_cursor = Cursor::new(Some(3), Some(1), Some(5));
        let old_rows = vec![RowRecord(json!({"market": "Busia"}))];
        store_page(
            &mut inner,
            "https://api.example.org/sauti/client/?currency=USD&next=2",
            &old_cursor,
            &json!({"records": [{"market": "Busia"}], "next": 3, "prev": 1, "pageCount": 5}),
            &old_rows,
        )
        .unwrap();
        let before = load_session(&inner).unwrap();

        let mut store = FailingOn {
            inner,
            key: StoreKey::RowData,
        };
        let err = store_page(
            &mut store,
            "https://api.example.org/sauti/client/?currency=USD&next=3",
            &Cursor::new(Some(4), Some(2), Some(5)),
            &json!({"records": [{"market": "Owino"}], "next": 4, "prev": 2, "pageCount": 5}),
            &[RowRecord(json!({"market": "Owino"}))],
        )
        .unwrap_err();

        assert!(matches!(err, PersistenceError::Io { .. }));
        assert_eq!(load_session(&store.inner).unwrap(), before);
    }

    #[test]
    fn failed_first_page_write_leaves_no_keys() {
        let mut store = FailingOn {
            inner: MemoryStore::new(),
            key: StoreKey::Data,
        };
        store_page(
            &mut store,
            "https://api.example.org/sauti/client/?currency=USD",
            &Cursor::new(Some(2), None, Some(5)),
            &json!({"records": [], "next": 2, "pageCount": 5}),
            &[],
        )
        .unwrap_err();

        for key in StoreKey::ALL {
            assert_eq!(store.inner.get(key).unwrap(), None);
        }
    }

    #[test]
    fn corrupt_rows_are_an_error() {
        let mut store = MemoryStore::new();
        store.set(StoreKey::RowData, "not json").unwrap();
        assert!(load_session(&store).is_err());
    }
}
