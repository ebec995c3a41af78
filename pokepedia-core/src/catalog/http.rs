//! PokeAPI source over HTTP
//!
//! Plain GET requests with reqwest. Bodies are read as text and decoded with
//! serde_json so malformed payloads surface as [`FetchError::Decode`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::model::{DetailBody, ListingPage};
use super::source::CatalogSource;
use crate::error::FetchError;

/// HTTP-backed [`CatalogSource`]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    /// Build a client with the pokepedia user agent
    ///
    /// Per-request timeouts are applied by the loader, not the client.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pokepedia/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<T, FetchError> {
        let response = request.send().await.map_err(|e| transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP {} from {}", status, url);
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| transport_error(url, e))?;

        serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

fn transport_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source: Box::new(e),
        }
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    async fn fetch_listing(&self, url: &str, limit: u32) -> Result<ListingPage, FetchError> {
        debug!("GET {}?limit={}", url, limit);
        let request = self.client.get(url).query(&[("limit", limit)]);
        self.get_json(request, url).await
    }

    async fn fetch_detail(&self, url: &str) -> Result<DetailBody, FetchError> {
        debug!("GET {}", url);
        self.get_json(self.client.get(url), url).await
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
