//! Domain types for the market price grid.
//!
//! Everything the query controller mutates or receives lives here: the
//! multi-dimension [`FilterState`], the server-issued [`Cursor`], the decoded
//! [`PageResponse`] and the filter option catalogue returned by the superlist
//! endpoint. Rows are carried as opaque [`RowRecord`] values.

pub mod currency;
pub mod cursor;
pub mod date_range;
pub mod dimension;
pub mod error;
pub mod filter;
pub mod response;
pub mod superlist;

pub use currency::{Currency, DEFAULT_CURRENCY};
pub use cursor::Cursor;
pub use date_range::{DATE_FORMAT, DateRange, parse_date};
pub use dimension::Dimension;
pub use error::{Result, ValidationError};
pub use filter::{FilterState, FilterValues};
pub use response::{PageResponse, RowRecord};
pub use superlist::{Superlist, country_label};
