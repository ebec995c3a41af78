//! Catalog source trait - Abstraction over where catalog records come from
//!
//! The loader only talks to this trait, which lets us swap between:
//! - PokeAPI over HTTP ([`super::HttpSource`])
//! - In-memory fixtures (testing)

use async_trait::async_trait;

use super::model::{DetailBody, ListingPage};
use crate::error::FetchError;

/// Transport for the two catalog endpoints
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the listing page at `url` with at most `limit` references
    async fn fetch_listing(&self, url: &str, limit: u32) -> Result<ListingPage, FetchError>;

    /// Fetch one detail record
    async fn fetch_detail(&self, url: &str) -> Result<DetailBody, FetchError>;

    /// Source identifier for logging
    fn name(&self) -> &'static str;
}
