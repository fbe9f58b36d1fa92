//! FilterState to query string, in three variants.

use sauti_model::{Dimension, FilterState};

use crate::encode::{QueryPairs, encode_component};
use crate::endpoint::Endpoint;
use crate::{CURRENCY_PARAM, CURSOR_PARAM, END_DATE_PARAM, START_DATE_PARAM};

/// Which request a query is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryVariant {
    /// No cursor. Issued once at startup to learn `pageCount`.
    Count,
    /// A page of rows. `None` asks for the first page.
    Paged { cursor: Option<u64> },
    /// The export endpoint. Never carries a cursor.
    Export,
}

impl QueryVariant {
    /// Endpoint this variant is sent to.
    #[must_use]
    pub const fn endpoint(self) -> Endpoint {
        match self {
            Self::Count | Self::Paged { .. } => Endpoint::Client,
            Self::Export => Endpoint::Export,
        }
    }

    const fn cursor(self) -> Option<u64> {
        match self {
            Self::Paged { cursor } => cursor,
            Self::Count | Self::Export => None,
        }
    }
}

/// Compile a filter state into ordered pairs.
#[must_use]
pub fn query_pairs(state: &FilterState, variant: QueryVariant) -> QueryPairs {
    let mut pairs = QueryPairs::new();
    pairs.push(CURRENCY_PARAM, state.currency().as_str());
    for dimension in Dimension::ALL {
        pairs.extend_key(dimension.param(), state.values(dimension));
    }
    if let Some(range) = state.date_range() {
        let (start, end) = range.wire_bounds();
        pairs.push(START_DATE_PARAM, start);
        pairs.push(END_DATE_PARAM, end);
    }
    if let Some(token) = variant.cursor() {
        pairs.push(CURSOR_PARAM, token.to_string());
    }
    pairs
}

/// Compile a filter state into its canonical `?...` query string.
#[must_use]
pub fn query_string(state: &FilterState, variant: QueryVariant) -> String {
    query_pairs(state, variant).encode()
}

/// `&<prefix>=<v1>&<prefix>=<v2>...` for one dimension, or `None` when empty.
#[must_use]
pub fn dimension_fragment(state: &FilterState, dimension: Dimension) -> Option<String> {
    let values = state.values(dimension);
    if values.is_empty() {
        return None;
    }
    let prefix = dimension.param();
    Some(
        values
            .iter()
            .map(|value| format!("&{prefix}={}", encode_component(value)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sauti_model::Currency;

    #[test]
    fn kenya_in_dollars() {
        let mut state = FilterState::new();
        state.set_currency(Currency::new("USD").unwrap());
        state.set_dimension(Dimension::Countries, vec!["KEN"]);
        assert_eq!(query_string(&state, QueryVariant::Count), "?currency=USD&c=KEN");
    }

    #[test]
    fn paged_variant_appends_cursor_last() {
        let mut state = FilterState::new();
        state.set_dimension(Dimension::Products, "Maize");
        assert_eq!(
            query_string(&state, QueryVariant::Paged { cursor: Some(7) }),
            "?currency=USD&p=Maize&next=7"
        );
        assert_eq!(
            query_string(&state, QueryVariant::Paged { cursor: None }),
            query_string(&state, QueryVariant::Count)
        );
    }

    #[test]
    fn export_variant_has_no_cursor() {
        let state = FilterState::new();
        assert_eq!(query_string(&state, QueryVariant::Export), "?currency=USD");
        assert_eq!(QueryVariant::Export.endpoint(), Endpoint::Export);
    }

    #[test]
    fn fragment_absent_for_empty_dimension() {
        let mut state = FilterState::new();
        assert_eq!(dimension_fragment(&state, Dimension::Markets), None);
        state.set_dimension(Dimension::Markets, vec!["Busia", "Owino"]);
        assert_eq!(
            dimension_fragment(&state, Dimension::Markets).as_deref(),
            Some("&m=Busia&m=Owino")
        );
    }
}
