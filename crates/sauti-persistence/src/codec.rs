//! Tagged-value codec for the text store.
//!
//! Instants cannot be stored natively, so they cross the store boundary as
//! [`StoredValue::Temporal`] and are written as `"moment:<epoch-millis>"`.
//! That text form matches sessions written by the browser dashboard, which
//! stored date bounds as local midnight. Date ranges are therefore read and
//! written in the local timezone.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use sauti_model::DateRange;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::{PersistenceError, Result};
use crate::keys::StoreKey;

/// Prefix that marks a string as an encoded instant.
pub const TEMPORAL_MARKER: &str = "moment:";

/// A primitive value as it crosses the store boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredValue {
    Plain(String),
    /// Millisecond precision; anything finer is dropped on encode.
    Temporal(DateTime<Utc>),
}

impl StoredValue {
    /// Text form written to the store.
    pub fn to_text(&self) -> std::result::Result<String, String> {
        match self {
            Self::Plain(text) if text.starts_with(TEMPORAL_MARKER) => Err(format!(
                "plain value {text:?} starts with the reserved {TEMPORAL_MARKER:?} marker"
            )),
            Self::Plain(text) => Ok(text.clone()),
            Self::Temporal(instant) => {
                Ok(format!("{TEMPORAL_MARKER}{}", instant.timestamp_millis()))
            }
        }
    }

    /// Read a text value back. Only well-formed tags become instants.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        text.strip_prefix(TEMPORAL_MARKER)
            .and_then(|millis| millis.parse::<i64>().ok())
            .and_then(DateTime::from_timestamp_millis)
            .map_or_else(|| Self::Plain(text.to_string()), Self::Temporal)
    }

    #[must_use]
    pub const fn as_instant(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Temporal(instant) => Some(instant),
            Self::Plain(_) => None,
        }
    }
}

impl Serialize for StoredValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let text = self.to_text().map_err(ser::Error::custom)?;
        serializer.serialize_str(&text)
    }
}

impl<'de> Deserialize<'de> for StoredValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)
            .map_err(|e| de::Error::custom(format!("expected a string value: {e}")))?;
        Ok(Self::from_text(&text))
    }
}

/// Serialize any value to store text.
pub fn serialize<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|source| PersistenceError::Serialization { source })
}

/// Deserialize store text read from `key`.
pub fn deserialize<T: DeserializeOwned>(key: StoreKey, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|source| PersistenceError::Deserialization { key, source })
}

/// Encode a date range as two tagged instants at local midnight.
pub fn encode_date_range(range: &DateRange) -> Result<String> {
    encode_date_range_in(range, &Local)
}

/// Decode a date range written by [`encode_date_range`].
pub fn decode_date_range(text: &str) -> Result<DateRange> {
    decode_date_range_in(text, &Local)
}

/// Encode a date range as two tagged instants at midnight in `tz`.
pub fn encode_date_range_in<Tz: TimeZone>(range: &DateRange, tz: &Tz) -> Result<String> {
    let bounds = [range.start(), range.end()].map(|date| StoredValue::Temporal(midnight(date, tz)));
    serialize(&bounds)
}

/// Decode a date range, taking each bound's calendar date in `tz`.
pub fn decode_date_range_in<Tz: TimeZone>(text: &str, tz: &Tz) -> Result<DateRange> {
    let values: Vec<StoredValue> = deserialize(StoreKey::Dates, text)?;
    let corrupt = |reason: String| PersistenceError::Corrupt {
        key: StoreKey::Dates,
        reason,
    };
    let [start, end]: &[StoredValue; 2] = values
        .as_slice()
        .try_into()
        .map_err(|_| corrupt(format!("expected 2 bounds, found {}", values.len())))?;
    let (Some(start), Some(end)) = (start.as_instant(), end.as_instant()) else {
        return Err(corrupt("bounds are not tagged instants".to_string()));
    };
    let date = |instant: &DateTime<Utc>| instant.with_timezone(tz).date_naive();
    DateRange::new(date(start), date(end)).map_err(|e| corrupt(e.to_string()))
}

/// Start of `date` in `tz`. Where a DST jump skips midnight, the day starts an
/// hour later.
fn midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let start = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&start)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(start + TimeDelta::hours(1))).earliest())
        .map_or_else(|| start.and_utc(), |instant| instant.with_timezone(&Utc))
}
