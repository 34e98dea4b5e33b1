//! HTTP clients for Artverse.
//!
//! Provides a small builder API over `reqwest` plus the two remote services
//! the engine talks to: the catalog API (`GET /nfts`) and the chat webhook.
//!
//! # Example
//!
//! ```rust,ignore
//! use artverse_data::{CatalogClient, FetchClient, FetchConfig};
//! use artverse_catalog::prelude::*;
//!
//! let client = FetchClient::new(FetchConfig::new("https://nft-wikepedia-api.onrender.com"))?;
//! let feed = CatalogFeed::new(CatalogClient::new(client));
//!
//! let page = feed.reset("chain:ethereum ape").await;
//! println!("{} NFT(s) found", page.total_count());
//! ```

mod catalog;
pub mod chat;
mod error;
mod request;
mod response;

pub use catalog::{CatalogClient, NFTS_PATH};
pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;

use std::collections::BTreeMap;
use std::time::Duration;

/// Connection settings for a [`FetchClient`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchConfig {
    /// Prepended to relative request paths.
    pub base_url: Option<String>,
    /// Whole-request timeout. `None` waits as long as the server does.
    pub timeout: Option<Duration>,
    /// Headers sent with every request.
    pub default_headers: BTreeMap<String, String>,
}

impl FetchConfig {
    /// Settings for a service rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }
}

/// HTTP client for outbound requests.
#[derive(Debug, Clone)]
pub struct FetchClient {
    config: FetchConfig,
    http: reqwest::Client,
}

impl FetchClient {
    /// Create a client. Fails only if the TLS backend cannot be set up.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| FetchError::RequestError(format!("http client: {}", e)))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a request, resolving relative paths against the base URL.
    pub fn request(&self, method: Method, url: impl Into<String>) -> RequestBuilder {
        let url = url.into();
        let full_url = match &self.config.base_url {
            Some(base) if !is_absolute(&url) => {
                format!("{}/{}", base.trim_end_matches('/'), url.trim_start_matches('/'))
            }
            _ => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.config.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }
        builder
    }

    /// Send the request and read the whole response.
    ///
    /// Non-2xx statuses are returned as responses; use
    /// [`Response::error_for_status`] to turn them into errors.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        if !is_absolute(&request.url) {
            return Err(FetchError::InvalidUrl(request.url));
        }

        tracing::debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let mut outgoing = self.http.request(request.method.to_reqwest(), &request.url);
        for (key, value) in &request.headers {
            outgoing = outgoing.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            outgoing = outgoing.body(body);
        }

        let response = Response::read(outgoing.send().await?).await?;
        tracing::debug!(status = response.status, bytes = response.body.len(), "received response");
        Ok(response)
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::chat::{ChatSession, ChatTransport, WebhookClient};
    pub use crate::{CatalogClient, FetchClient, FetchConfig, FetchError, Response};
}
