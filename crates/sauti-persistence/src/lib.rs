//! Durable session storage for the market price grid.
//!
//! The grid survives a reload by writing its last request URL, cursor, raw
//! response, cached rows and date range into a plain-text key-value store.
//!
//! # Store keys
//!
//! | Key       | Content                                   |
//! |-----------|-------------------------------------------|
//! | `q`       | last request URL (JSON string)            |
//! | `page`    | `{"next", "prev", "pageCount"}`           |
//! | `data`    | last raw response payload                 |
//! | `rowdata` | cached row page (JSON array)              |
//! | `dates`   | date range as two tagged instants         |
//!
//! # Temporal values
//!
//! The store only holds JSON-compatible primitives. Instants are written as
//! `"moment:<epoch-millis>"` strings through [`StoredValue::Temporal`] and
//! read back into `DateTime<Utc>`; every other value passes through as-is.
//!
//! # Architecture
//!
//! - `store/` - the [`DurableStore`] trait with in-memory and file backends
//! - `codec.rs` - tagged temporal encoding
//! - `session.rs` - load, save and wipe of the persisted session
//! - `error.rs` - error types with user-friendly messages

mod codec;
mod error;
mod keys;
mod session;
mod store;

pub use codec::{
    TEMPORAL_MARKER, StoredValue, decode_date_range, decode_date_range_in, deserialize,
    encode_date_range, encode_date_range_in, serialize,
};
pub use error::{PersistenceError, Result};
pub use keys::StoreKey;
pub use session::{
    PersistedSession, load_session, store_cursor, store_dates, store_page, wipe_session,
};
pub use store::{DurableStore, FileStore, MemoryStore};
