//! Query compilation for the market price grid.
//!
//! A [`FilterState`](sauti_model::FilterState) compiles into an ordered list
//! of `(key, value)` pairs which one canonical encoder turns into the query
//! string. The same state always yields byte-identical output, so a persisted
//! request URL reproduces the fetch that produced the cached rows.
//!
//! Field order is fixed: `currency, c, m, s, pcat, pagg, p, startDate,
//! endDate, next`.

pub mod builder;
pub mod encode;
pub mod endpoint;
pub mod error;
pub mod restore;

pub use builder::{QueryVariant, dimension_fragment, query_pairs, query_string};
pub use encode::{QueryPairs, encode_component};
pub use endpoint::{ApiEndpoints, DEFAULT_API_BASE, Endpoint};
pub use error::{QueryError, Result};
pub use restore::{RestoredQuery, restore_query};

/// Query parameter carrying the cursor token.
pub const CURSOR_PARAM: &str = "next";
/// Query parameter carrying the currency.
pub const CURRENCY_PARAM: &str = "currency";
/// Query parameter carrying the range start.
pub const START_DATE_PARAM: &str = "startDate";
/// Query parameter carrying the range end.
pub const END_DATE_PARAM: &str = "endDate";
