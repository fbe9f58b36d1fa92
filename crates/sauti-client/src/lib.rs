//! Remote access for the market price grid.
//!
//! The session never talks to HTTP directly. It goes through the
//! [`Transport`] trait, which returns the resolved request URL together with
//! the decoded JSON body. [`HttpTransport`] is the production implementation:
//! a `reqwest` client with a bearer credential from an [`AuthProvider`] and a
//! response cache that [`CacheMode::NoCache`] bypasses.

mod auth;
mod decode;
mod error;
mod http;
mod transport;

pub use auth::{AuthProvider, StaticToken};
pub use decode::{decode_page, decode_superlist, server_error};
pub use error::{Result, TransportError};
pub use http::{DEFAULT_TIMEOUT, HttpTransport};
pub use transport::{CacheMode, Transport, TransportResponse};

pub use reqwest::Url;
