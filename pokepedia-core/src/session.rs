//! Browsing session - the state a catalog screen binds to
//!
//! A [`Session`] owns the load status, the current search term and the
//! derived result set. Hosts either call [`Session::load`] directly or split
//! it into [`Session::begin_load`] / [`Session::finish_load`] when the fetch
//! runs on a separate task.
//!
//! The session's cancellation token is cancelled when the session is
//! dropped, so a load bound to it never outlives the screen that asked
//! for it.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cancel::{CancelOnDrop, CancellationToken};
use crate::catalog::{Catalog, CatalogLoader, Entry, LoadReport};
use crate::error::LoadError;
use crate::search;

/// Where the session is in its single load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No load has been started
    Idle,
    Loading,
    /// The catalog is available (possibly empty)
    Ready(Arc<Catalog>),
    /// The load failed; the message is suitable for display
    Failed(String),
}

impl LoadStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoadStatus::Ready(_) | LoadStatus::Failed(_))
    }
}

pub struct Session {
    status: LoadStatus,
    search_term: String,
    search_results: Vec<Entry>,
    /// Names of entries skipped by a partial load
    skipped: Vec<String>,
    cancel: CancelOnDrop,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            status: LoadStatus::Idle,
            search_term: String::new(),
            search_results: Vec::new(),
            skipped: Vec::new(),
            cancel: CancellationToken::new().drop_guard(),
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// Token bound to this session's lifetime
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.token().clone()
    }

    /// Abort the load, if one is in flight
    pub fn cancel(&self) {
        self.cancel.token().cancel();
    }

    /// The whole catalog; empty until the load succeeds
    pub fn items(&self) -> &[Entry] {
        match &self.status {
            LoadStatus::Ready(catalog) => catalog.entries(),
            _ => &[],
        }
    }

    pub fn catalog(&self) -> Option<Arc<Catalog>> {
        match &self.status {
            LoadStatus::Ready(catalog) => Some(Arc::clone(catalog)),
            _ => None,
        }
    }

    /// Filtered entries for the current term
    ///
    /// Empty while no filter is active; use [`Self::visible`] or
    /// [`Self::is_filtering`] to tell that apart from "no matches".
    pub fn search_results(&self) -> &[Entry] {
        &self.search_results
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn is_filtering(&self) -> bool {
        search::is_active(&self.search_term)
    }

    /// What a list view should show right now
    pub fn visible(&self) -> &[Entry] {
        if self.is_filtering() {
            &self.search_results
        } else {
            self.items()
        }
    }

    /// Entries a partial load could not fetch
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn set_search_term(&mut self, text: impl Into<String>) {
        self.search_term = text.into();
        self.refresh_results();
    }

    pub fn clear_search(&mut self) {
        self.search_term.clear();
        self.search_results.clear();
    }

    /// Move from `Idle` to `Loading`
    ///
    /// Returns the token the fetch must honour, or `None` if a load was
    /// already started. There is no way back to `Idle`.
    pub fn begin_load(&mut self) -> Option<CancellationToken> {
        if self.status != LoadStatus::Idle {
            debug!("Ignoring load request; session is {:?}", self.status);
            return None;
        }
        self.status = LoadStatus::Loading;
        Some(self.cancellation_token())
    }

    /// Record the outcome of the load started by [`Self::begin_load`]
    pub fn finish_load(&mut self, outcome: Result<LoadReport, LoadError>) {
        if self.status != LoadStatus::Loading {
            warn!("Discarding load result; session is {:?}", self.status);
            return;
        }

        match outcome {
            Ok(report) => {
                info!("Session ready with {} entries", report.catalog.len());
                self.skipped = report
                    .failures
                    .into_iter()
                    .map(|failure| failure.reference.name)
                    .collect();
                self.status = LoadStatus::Ready(Arc::new(report.catalog));
            }
            Err(e) => {
                warn!("Session load failed: {}", e);
                self.status = LoadStatus::Failed(error_chain(&e));
            }
        }

        self.refresh_results();
    }

    /// Run the single load for this session
    pub async fn load(&mut self, loader: &CatalogLoader) -> &LoadStatus {
        if let Some(cancel) = self.begin_load() {
            let outcome = loader.load_with_report(&cancel).await;
            self.finish_load(outcome);
        }
        &self.status
    }

    fn refresh_results(&mut self) {
        self.search_results = if self.is_filtering() {
            search::filter_owned(self.items(), &self.search_term)
        } else {
            Vec::new()
        };
    }
}

/// Render an error and its sources as one line
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::mock::MockSource;
    use crate::catalog::CatalogSource;
    use crate::config::{AggregationPolicy, CatalogConfig};
    use pretty_assertions::assert_eq;

    fn loader(source: MockSource, config: CatalogConfig) -> CatalogLoader {
        let source: Arc<dyn CatalogSource> = Arc::new(source);
        CatalogLoader::new(source, config)
    }

    fn starters() -> MockSource {
        MockSource::with_entries(&[
            ("bulbasaur", "imgA"),
            ("ivysaur", "imgB"),
            ("charmander", "imgC"),
        ])
    }

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_idle_to_ready() {
        let mut session = Session::new();
        assert_eq!(session.status(), &LoadStatus::Idle);
        assert!(session.items().is_empty());

        let status = session
            .load(&loader(starters(), CatalogConfig::default()))
            .await;
        assert!(matches!(status, LoadStatus::Ready(_)));
        assert!(!session.is_loading());
        assert_eq!(
            names(session.items()),
            vec!["bulbasaur", "ivysaur", "charmander"]
        );
        assert!(session.skipped().is_empty());
    }

    #[tokio::test]
    async fn test_failed_is_distinct_from_empty() {
        let mut failing = Session::new();
        failing
            .load(&loader(starters().fail_detail(0), CatalogConfig::default()))
            .await;

        match failing.status() {
            LoadStatus::Failed(message) => {
                assert!(message.contains("bulbasaur"));
                assert!(message.contains("404"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
        assert!(failing.items().is_empty());

        let mut empty = Session::new();
        empty
            .load(&loader(MockSource::default(), CatalogConfig::default()))
            .await;
        assert!(matches!(empty.status(), LoadStatus::Ready(c) if c.is_empty()));
    }

    #[tokio::test]
    async fn test_load_runs_once() {
        let mut session = Session::new();
        let catalog_loader = loader(starters(), CatalogConfig::default());
        session.load(&catalog_loader).await;
        let first = session.catalog().unwrap();

        session.load(&catalog_loader).await;
        assert!(Arc::ptr_eq(&first, &session.catalog().unwrap()));
        assert!(session.begin_load().is_none());
    }

    #[tokio::test]
    async fn test_search_term_drives_results() {
        let mut session = Session::new();
        session
            .load(&loader(starters(), CatalogConfig::default()))
            .await;

        // Blank term: sentinel empty results, full list visible
        assert!(session.search_results().is_empty());
        assert_eq!(session.visible().len(), 3);

        session.set_search_term("SAUR");
        assert!(session.is_filtering());
        assert_eq!(names(session.search_results()), vec!["bulbasaur", "ivysaur"]);
        assert_eq!(names(session.visible()), vec!["bulbasaur", "ivysaur"]);

        session.set_search_term("pikachu");
        assert!(session.visible().is_empty());
        assert!(session.is_filtering());

        session.clear_search();
        assert_eq!(session.search_term(), "");
        assert!(session.search_results().is_empty());
        assert_eq!(session.visible().len(), 3);
    }

    #[tokio::test]
    async fn test_term_set_while_loading_applies_on_ready() {
        let mut session = Session::new();
        let cancel = session.begin_load().unwrap();
        assert!(session.is_loading());

        session.set_search_term("char");
        assert!(session.search_results().is_empty());

        let outcome = loader(starters(), CatalogConfig::default())
            .load_with_report(&cancel)
            .await;
        session.finish_load(outcome);

        assert_eq!(names(session.search_results()), vec!["charmander"]);
    }

    #[tokio::test]
    async fn test_partial_load_records_skipped() {
        let config = CatalogConfig {
            policy: AggregationPolicy::Partial,
            ..Default::default()
        };
        let mut session = Session::new();
        session.load(&loader(starters().fail_detail(1), config)).await;

        assert_eq!(names(session.items()), vec!["bulbasaur", "charmander"]);
        assert_eq!(session.skipped(), ["ivysaur".to_string()]);
    }

    #[tokio::test]
    async fn test_cancelled_session_fails_load() {
        let mut session = Session::new();
        session.cancel();
        session
            .load(&loader(starters(), CatalogConfig::default()))
            .await;

        assert!(matches!(session.status(), LoadStatus::Failed(m) if m.contains("cancelled")));
    }

    #[test]
    fn test_drop_cancels_token() {
        let session = Session::new();
        let token = session.cancellation_token();
        assert!(!token.is_cancelled());
        drop(session);
        assert!(token.is_cancelled());
    }
}
