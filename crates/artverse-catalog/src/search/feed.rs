//! The paginated catalog feed.
//!
//! `reset` runs the whole pipeline (fetch, normalize, filter) for a new search
//! string; `load_more` reveals the next page. Every fetch carries a generation
//! number and only the newest one may write its result, so a slow response
//! that lands after a newer `reset` is dropped instead of overwriting it.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::catalog::{NormalizedAsset, Normalizer};
use crate::error::CatalogError;
use crate::search::results::{PageState, DEFAULT_PAGE_SIZE};
use crate::search::ParsedQuery;
use crate::source::CatalogSource;

/// Feed configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// Assets revealed per page.
    pub page_size: usize,
    /// Whether `load_more` fetches the catalog again before growing the page.
    pub refetch_on_load_more: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            refetch_on_load_more: true,
        }
    }
}

/// Whether a fetch is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedPhase {
    Idle,
    Loading,
}

#[derive(Debug)]
struct FeedState {
    page: PageState,
    query: String,
    parsed: ParsedQuery,
    phase: FeedPhase,
    /// Generation of the newest fetch issued.
    latest: u64,
}

/// Returns the feed to idle if its fetch future is dropped before finishing,
/// unless a newer fetch has been issued since.
struct InFlight<'a> {
    state: &'a Mutex<FeedState>,
    generation: u64,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(state: &'a Mutex<FeedState>, generation: u64) -> Self {
        Self {
            state,
            generation,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.latest == self.generation {
            tracing::debug!(generation = self.generation, "catalog fetch abandoned");
            state.phase = FeedPhase::Idle;
        }
    }
}

/// Paginated, filtered view over a [`CatalogSource`].
///
/// Methods take `&self`; the state lock is never held across an await, so a
/// second `reset` may start while the first is still in flight. Dropping a
/// `reset` or `load_more` future mid-fetch leaves the page as it was and the
/// feed idle.
pub struct CatalogFeed<S> {
    source: S,
    normalizer: Normalizer,
    config: FeedConfig,
    state: Mutex<FeedState>,
}

impl<S: CatalogSource> CatalogFeed<S> {
    /// Create a feed with default configuration.
    pub fn new(source: S) -> Self {
        let config = FeedConfig::default();
        Self {
            source,
            normalizer: Normalizer::new(),
            state: Mutex::new(FeedState {
                page: PageState::empty(config.page_size),
                query: String::new(),
                parsed: ParsedQuery::default(),
                phase: FeedPhase::Idle,
                latest: 0,
            }),
            config,
        }
    }

    /// Set the feed configuration.
    pub fn with_config(mut self, config: FeedConfig) -> Self {
        self.state_mut().page = PageState::empty(config.page_size);
        self.config = config;
        self
    }

    /// Set the normalizer used on every fetched record.
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Start over for a new search string.
    ///
    /// Always fetches. On failure the feed is left empty and exhausted. If a
    /// newer fetch was issued meanwhile, this one's result is discarded and the
    /// current state is returned.
    pub async fn reset(&self, query: &str) -> PageState {
        let parsed = ParsedQuery::parse(query);
        let generation = {
            let mut state = self.lock();
            state.latest += 1;
            state.query = query.to_string();
            state.parsed = parsed.clone();
            state.phase = FeedPhase::Loading;
            state.latest
        };
        tracing::debug!(generation, query = %parsed, "catalog reset");

        let mut in_flight = InFlight::new(&self.state, generation);
        let outcome = self.fetch_filtered(&parsed).await;
        in_flight.disarm();

        let mut state = self.lock();
        if state.latest != generation {
            tracing::debug!(generation, latest = state.latest, "discarding stale catalog response");
            return state.page.clone();
        }

        state.phase = FeedPhase::Idle;
        state.page = match outcome {
            Ok(filtered) => PageState::new(filtered, self.config.page_size),
            Err(e) => {
                tracing::warn!(error = %e, "catalog fetch failed, showing empty results");
                PageState::empty(self.config.page_size)
            }
        };
        tracing::debug!(
            generation,
            visible = state.page.visible_count(),
            matched = state.page.matched_count(),
            "catalog reset complete"
        );
        state.page.clone()
    }

    /// Reveal the next page.
    ///
    /// A no-op while a fetch is in flight or once every match is visible.
    pub async fn load_more(&self) -> PageState {
        let (generation, parsed) = {
            let mut state = self.lock();
            if state.phase == FeedPhase::Loading || !state.page.has_more() {
                return state.page.clone();
            }
            if !self.config.refetch_on_load_more {
                state.page.advance();
                return state.page.clone();
            }
            state.latest += 1;
            state.phase = FeedPhase::Loading;
            (state.latest, state.parsed.clone())
        };
        tracing::debug!(generation, "catalog load more");

        let mut in_flight = InFlight::new(&self.state, generation);
        let outcome = self.fetch_filtered(&parsed).await;
        in_flight.disarm();

        let mut state = self.lock();
        if state.latest != generation {
            tracing::debug!(generation, latest = state.latest, "discarding stale catalog response");
            return state.page.clone();
        }

        state.phase = FeedPhase::Idle;
        let next = match outcome {
            Ok(filtered) => state.page.advanced_over(filtered),
            Err(e) => {
                tracing::warn!(error = %e, "catalog fetch failed, showing empty results");
                PageState::empty(self.config.page_size)
            }
        };
        state.page = next;
        state.page.clone()
    }

    /// Current state without fetching.
    pub fn snapshot(&self) -> PageState {
        self.lock().page.clone()
    }

    /// Whether a fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.lock().phase == FeedPhase::Loading
    }

    /// The search string of the newest `reset`.
    pub fn query(&self) -> String {
        self.lock().query.clone()
    }

    async fn fetch_filtered(&self, parsed: &ParsedQuery) -> Result<Vec<NormalizedAsset>, CatalogError> {
        let records = self.source.fetch_catalog().await?;
        let assets = self.normalizer.normalize_all(&records);
        Ok(parsed.filter(&assets))
    }

    fn lock(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&mut self) -> &mut FeedState {
        self.state.get_mut().unwrap_or_else(PoisonError::into_inner)
    }
}
