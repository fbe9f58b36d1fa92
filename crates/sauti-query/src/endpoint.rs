//! Remote endpoint resolution.

use reqwest::Url;
use sauti_model::FilterState;

use crate::builder::{QueryVariant, query_pairs};
use crate::error::{QueryError, Result};

/// Production API root.
pub const DEFAULT_API_BASE: &str = "https://sauti-marketprice-data.herokuapp.com/sauti/";

/// The three remote endpoints the grid talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET <base>/client/` - paged rows.
    Client,
    /// `GET <base>/client/superlist` - filter options.
    Superlist,
    /// `GET <base>/client/export/` - downloadable resource.
    Export,
}

impl Endpoint {
    /// Path relative to the API base.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Client => "client/",
            Self::Superlist => "client/superlist",
            Self::Export => "client/export/",
        }
    }
}

/// Resolves endpoints and compiled queries against one API base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    base: Url,
}

impl ApiEndpoints {
    /// Parse an API base. A missing trailing slash is added so that
    /// endpoint paths join underneath it.
    pub fn new(base: &str) -> Result<Self> {
        let mut url = Url::parse(base).map_err(|e| QueryError::InvalidBase {
            url: base.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(QueryError::InvalidBase {
                url: base.to_string(),
                reason: "expected an http or https URL".to_string(),
            });
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url.set_query(None);
        url.set_fragment(None);
        Ok(Self { base: url })
    }

    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// Absolute URL of an endpoint, without a query.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url> {
        self.base
            .join(endpoint.path())
            .map_err(|e| QueryError::Join {
                path: endpoint.path(),
                reason: e.to_string(),
            })
    }

    /// Absolute request URL for a filter state and variant.
    pub fn request_url(&self, state: &FilterState, variant: QueryVariant) -> Result<Url> {
        let mut url = self.endpoint_url(variant.endpoint())?;
        let pairs = query_pairs(state, variant);
        if !pairs.is_empty() {
            url.set_query(Some(&pairs.encode_body()));
        }
        tracing::debug!(%url, ?variant, "compiled request URL");
        Ok(url)
    }
}
