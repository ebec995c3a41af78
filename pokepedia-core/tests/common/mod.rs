//! Shared fixtures for integration tests
//!
//! `FixtureSource` serves canned PokeAPI bodies keyed by URL so the loader
//! can be exercised without a network.

use async_trait::async_trait;
use pokepedia_core::catalog::{CatalogSource, DetailBody, ListingPage, Reference};
use pokepedia_core::FetchError;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (only once per test run)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

#[derive(Default)]
pub struct FixtureSource {
    listing: Vec<Reference>,
    details: HashMap<String, Value>,
    listing_status: Option<u16>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reference whose detail request succeeds with `body`
    pub fn with_entry(mut self, name: &str, url: &str, body: Value) -> Self {
        self.listing.push(Reference {
            name: name.to_string(),
            url: url.to_string(),
        });
        self.details.insert(url.to_string(), body);
        self
    }

    /// Add a reference whose detail request answers 500
    pub fn with_broken_entry(mut self, name: &str, url: &str) -> Self {
        self.listing.push(Reference {
            name: name.to_string(),
            url: url.to_string(),
        });
        self
    }

    pub fn with_listing_status(mut self, status: u16) -> Self {
        self.listing_status = Some(status);
        self
    }
}

#[async_trait]
impl CatalogSource for FixtureSource {
    async fn fetch_listing(&self, url: &str, limit: u32) -> Result<ListingPage, FetchError> {
        if let Some(status) = self.listing_status {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        Ok(ListingPage {
            results: self.listing.iter().take(limit as usize).cloned().collect(),
        })
    }

    async fn fetch_detail(&self, url: &str) -> Result<DetailBody, FetchError> {
        let body = self.details.get(url).ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 500,
        })?;

        serde_json::from_value(body.clone()).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}
