//! Restore a FilterState from a persisted request URL.

use reqwest::Url;
use sauti_model::{Currency, DateRange, Dimension, FilterState, ValidationError};

use crate::error::{QueryError, Result};
use crate::{CURRENCY_PARAM, CURSOR_PARAM, END_DATE_PARAM, START_DATE_PARAM};

/// Base used to parse a bare `?...` query string.
const RELATIVE_BASE: &str = "http://localhost/";

/// What a persisted query string decodes back into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoredQuery {
    /// Filters repopulated from the query parameters.
    pub filters: FilterState,
    /// The cursor token the query was issued with, if any.
    pub cursor: Option<u64>,
    /// Set when the query named a date range that no longer validates.
    pub rejected_range: Option<ValidationError>,
}

/// Parse a persisted request URL (or bare `?...` query) back into filters.
///
/// A single parameter restores as a one-element list. A missing or blank
/// currency restores as USD. The date range is restored only when both
/// bounds are present and still valid.
pub fn restore_query(persisted: &str) -> Result<RestoredQuery> {
    let url = parse_persisted(persisted)?;

    let mut lists: [Vec<String>; 6] = Default::default();
    let mut currency = None;
    let mut start = None;
    let mut end = None;
    let mut cursor = None;

    for (key, value) in url.query_pairs() {
        if let Some(dimension) = Dimension::from_param(&key) {
            if let Some(slot) = Dimension::ALL.iter().position(|d| *d == dimension) {
                lists[slot].push(value.into_owned());
            }
            continue;
        }
        match key.as_ref() {
            CURRENCY_PARAM => currency = Some(value.into_owned()),
            START_DATE_PARAM => start = Some(value.into_owned()),
            END_DATE_PARAM => end = Some(value.into_owned()),
            CURSOR_PARAM => cursor = value.parse::<u64>().ok(),
            other => tracing::debug!(param = other, "ignoring unknown query parameter"),
        }
    }

    let mut filters = FilterState::new();
    for (dimension, values) in Dimension::ALL.into_iter().zip(lists) {
        filters.set_dimension(dimension, values);
    }

    match currency.as_deref().map(str::trim) {
        None | Some("") => {}
        Some(code) => match Currency::new(code) {
            Ok(currency) => filters.set_currency(currency),
            Err(err) => tracing::warn!(%err, "persisted currency rejected, using default"),
        },
    }

    let mut rejected_range = None;
    if let (Some(start), Some(end)) = (start, end) {
        match DateRange::parse(&start, &end).and_then(|range| filters.set_date_range(Some(range))) {
            Ok(()) => {}
            Err(err) => {
                tracing::warn!(%err, "persisted date range rejected");
                rejected_range = Some(err);
            }
        }
    }

    Ok(RestoredQuery {
        filters,
        cursor,
        rejected_range,
    })
}

fn parse_persisted(persisted: &str) -> Result<Url> {
    let trimmed = persisted.trim();
    let parsed = if trimmed.starts_with('?') {
        Url::parse(RELATIVE_BASE).and_then(|base| base.join(trimmed))
    } else {
        Url::parse(trimmed)
    };
    parsed.map_err(|e| QueryError::InvalidPersisted {
        query: persisted.to_string(),
        reason: e.to_string(),
    })
}
