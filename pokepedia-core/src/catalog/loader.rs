//! Two-phase catalog loader
//!
//! 1. One listing request returns the ordered references.
//! 2. One detail request per reference, issued concurrently. All of them
//!    settle before any outcome is inspected, then the configured
//!    [`AggregationPolicy`] decides what a failure means.
//!
//! The whole operation races the caller's [`CancellationToken`]; losing the
//! race drops every in-flight request.

use futures::future::join_all;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::model::{Catalog, DetailBody, Entry, Reference};
use super::source::CatalogSource;
use crate::cancel::CancellationToken;
use crate::config::{AggregationPolicy, CatalogConfig};
use crate::error::{FetchError, LoadError};

/// A detail fetch that failed during a partial load
#[derive(Debug)]
pub struct DetailFailure {
    /// Position of the reference in the listing
    pub index: usize,
    pub reference: Reference,
    pub error: FetchError,
}

/// Outcome of a load, including any per-entry failures
#[derive(Debug)]
pub struct LoadReport {
    pub catalog: Catalog,
    /// Always empty under [`AggregationPolicy::AllOrNothing`]
    pub failures: Vec<DetailFailure>,
    /// Number of references returned by the listing
    pub requested: usize,
}

impl LoadReport {
    /// True when every detail fetch succeeded
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fetches and aggregates the catalog
#[derive(Clone)]
pub struct CatalogLoader {
    source: Arc<dyn CatalogSource>,
    config: CatalogConfig,
}

impl CatalogLoader {
    pub fn new(source: Arc<dyn CatalogSource>, config: CatalogConfig) -> Self {
        Self { source, config }
    }

    /// Loader backed by PokeAPI over HTTP
    #[cfg(feature = "http")]
    pub fn http(config: CatalogConfig) -> Result<Self, reqwest::Error> {
        let source = super::http::HttpSource::new()?;
        Ok(Self::new(Arc::new(source), config))
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Load the catalog, returning only the entries
    ///
    /// Under the partial policy, failed entries are dropped silently here;
    /// use [`Self::load_with_report`] to see them.
    pub async fn load(&self, cancel: &CancellationToken) -> Result<Catalog, LoadError> {
        self.load_with_report(cancel).await.map(|report| report.catalog)
    }

    /// Load the catalog and report per-entry failures
    pub async fn load_with_report(
        &self,
        cancel: &CancellationToken,
    ) -> Result<LoadReport, LoadError> {
        if cancel.is_cancelled() {
            return Err(LoadError::Cancelled);
        }

        debug!(
            "Loading catalog via {} source (limit: {}, policy: {:?})",
            self.source.name(),
            self.config.limit,
            self.config.policy
        );

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Catalog load cancelled; dropping in-flight requests");
                Err(LoadError::Cancelled)
            }
            result = self.run() => result,
        }
    }

    async fn run(&self) -> Result<LoadReport, LoadError> {
        let references = self.fetch_references().await?;
        let outcomes = self.fetch_details(&references).await;
        self.aggregate(references, outcomes)
    }

    /// Listing fetch with the configured number of retries
    async fn fetch_references(&self) -> Result<Vec<Reference>, LoadError> {
        let url = self.config.listing_url();
        let mut attempt = 0;

        loop {
            match self.source.fetch_listing(&url, self.config.limit).await {
                Ok(page) => {
                    debug!("Listing returned {} references", page.results.len());
                    return Ok(page.results);
                }
                Err(e) if attempt < self.config.listing_retries => {
                    attempt += 1;
                    warn!(
                        "Listing fetch failed: {}; retrying ({}/{})",
                        e, attempt, self.config.listing_retries
                    );
                    tokio::time::sleep(self.config.retry_delay()).await;
                }
                Err(e) => {
                    warn!("Listing fetch failed: {}", e);
                    return Err(LoadError::Network(e));
                }
            }
        }
    }

    /// Fan out one request per reference; results keep listing order
    async fn fetch_details(&self, references: &[Reference]) -> Vec<Result<DetailBody, FetchError>> {
        let requests = references.iter().map(|r| self.fetch_detail(r));

        match self.config.max_concurrent_requests {
            // buffered(0) never polls anything, so a zero cap means one at a time
            Some(cap) => stream::iter(requests).buffered(cap.max(1)).collect::<Vec<_>>().await,
            None => join_all(requests).await,
        }
    }

    async fn fetch_detail(&self, reference: &Reference) -> Result<DetailBody, FetchError> {
        let request = self.source.fetch_detail(&reference.url);

        match self.config.request_timeout() {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .unwrap_or_else(|_| {
                    Err(FetchError::Timeout {
                        url: reference.url.clone(),
                    })
                }),
            None => request.await,
        }
    }

    fn aggregate(
        &self,
        references: Vec<Reference>,
        outcomes: Vec<Result<DetailBody, FetchError>>,
    ) -> Result<LoadReport, LoadError> {
        let requested = references.len();
        let mut entries = Vec::with_capacity(requested);
        let mut failures = Vec::new();

        for (index, (reference, outcome)) in references.into_iter().zip(outcomes).enumerate() {
            match outcome {
                Ok(body) => entries.push(Entry::from(body)),
                Err(error) => {
                    warn!("Detail fetch for '{}' failed: {}", reference.name, error);
                    failures.push(DetailFailure {
                        index,
                        reference,
                        error,
                    });
                }
            }
        }

        if self.config.policy == AggregationPolicy::AllOrNothing {
            let failed = failures.len();
            if let Some(first) = failures.into_iter().next() {
                return Err(LoadError::DetailFetch {
                    reference: first.reference,
                    failed,
                    total: requested,
                    source: first.error,
                });
            }
            failures = Vec::new();
        }

        info!(
            "Loaded {} of {} catalog entries",
            entries.len(),
            requested
        );

        Ok(LoadReport {
            catalog: Catalog::new(entries),
            failures,
            requested,
        })
    }
}
