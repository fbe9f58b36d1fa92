//! reqwest-backed transport.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Response, Url};
use serde_json::Value;

use crate::auth::AuthProvider;
use crate::decode::server_error;
use crate::error::{Result, TransportError};
use crate::transport::{CacheMode, Transport, TransportResponse};

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("sauti-grid/", env!("CARGO_PKG_VERSION"));

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP transport with bearer auth and an in-process response cache.
#[derive(Debug)]
pub struct HttpTransport<A> {
    client: reqwest::Client,
    auth: A,
    cache: Mutex<HashMap<Url, TransportResponse>>,
}

impl<A: AuthProvider> HttpTransport<A> {
    /// Creates a transport with the default timeout.
    pub fn new(auth: A) -> Result<Self> {
        Self::with_timeout(auth, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(auth: A, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT_VALUE)
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            auth,
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// Number of cached responses.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.lock().map_or(0, |cache| cache.len())
    }

    fn cached(&self, url: &Url) -> Option<TransportResponse> {
        self.cache.lock().ok()?.get(url).cloned()
    }

    fn remember(&self, url: &Url, response: &TransportResponse) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(url.clone(), response.clone());
        }
    }

    async fn fetch(&self, url: &Url) -> Result<TransportResponse> {
        let mut request = self.client.get(url.clone());
        if let Some(token) = self.auth.bearer_token() {
            request = request.bearer_auth(token);
        }

        tracing::debug!(%url, "GET");
        let response = request.send().await?;
        handle_response(response).await
    }
}

impl<A: AuthProvider> Transport for HttpTransport<A> {
    async fn get(&self, url: &Url, mode: CacheMode) -> Result<TransportResponse> {
        if mode == CacheMode::Default
            && let Some(hit) = self.cached(url)
        {
            tracing::trace!(%url, "served from cache");
            return Ok(hit);
        }

        let response = self.fetch(url).await?;
        if mode == CacheMode::Default {
            self.remember(url, &response);
        }
        Ok(response)
    }
}

/// Checks the status, decodes the body and surfaces explicit error fields.
async fn handle_response(response: Response) -> Result<TransportResponse> {
    let status = response.status();
    let url = response.url().clone();
    let body = response.text().await?;
    let data = parse_body(&body);

    if !status.is_success() {
        let message = server_error(&data)
            .or_else(|| data.get("message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string());
        tracing::warn!(%url, status = status.as_u16(), %message, "request failed");
        return Err(TransportError::Status {
            status: status.as_u16(),
            message,
        });
    }

    if let Some(message) = server_error(&data) {
        tracing::warn!(%url, %message, "server reported an error");
        return Err(TransportError::Server(message));
    }

    Ok(TransportResponse { url, data })
}

fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}
