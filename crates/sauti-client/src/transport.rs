//! The transport seam between the session and the network.

use std::future::Future;

use reqwest::Url;
use serde_json::Value;

use crate::error::Result;

/// Whether a response may be served from, and stored in, the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheMode {
    #[default]
    Default,
    /// Always hit the network. Only the export call uses this.
    NoCache,
}

/// A successful response.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// The URL the request finally resolved to.
    pub url: Url,
    /// Decoded JSON body. A non-JSON body is carried as a string.
    pub data: Value,
}

/// `get(url) -> {data, error}`, with the error side carried by `Result`.
pub trait Transport {
    fn get(
        &self,
        url: &Url,
        mode: CacheMode,
    ) -> impl Future<Output = Result<TransportResponse>> + Send;
}

impl<T: Transport + Sync + ?Sized> Transport for &T {
    fn get(
        &self,
        url: &Url,
        mode: CacheMode,
    ) -> impl Future<Output = Result<TransportResponse>> + Send {
        (**self).get(url, mode)
    }
}
