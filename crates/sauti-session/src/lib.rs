//! Filter-and-pagination session for the market price grid.
//!
//! - [`PaginationTracker`] decides what "next" and "back" may do.
//! - [`Session`] is the one mutable aggregate: filters, cursor, rows and the
//!   durable store, changed through [`Action`]s and generation-tagged fetches.
//! - [`SessionController`] drives a session over a
//!   [`Transport`](sauti_client::Transport).

mod busy;
mod controller;
mod error;
mod session;
mod tracker;

pub use busy::BusyReason;
pub use controller::{ExportLink, SessionController};
pub use error::{Result, SessionError};
pub use session::{Action, FetchOutcome, PendingFetch, Session, Trigger};
pub use tracker::{BackAction, PaginationState, PaginationTracker};
