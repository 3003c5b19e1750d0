//! Memoizing resolution of search terms to exact-title tracks.
//!
//! Every distinct term is looked up at most once per [`TrackResolver`].
//! The cache keeps one [`OnceCell`] per term: the first caller runs the
//! paginated search while concurrent callers for the same term wait on the
//! same cell, so parallel lookups never duplicate an external query. Empty
//! results are cached like any other.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OnceCell;

use crate::search::{DEFAULT_MARKET, SearchQuery, TrackSearch};
use crate::track::TrackCandidate;

/// Exact matches for a term, most popular first. Shared between callers.
pub type Matches = Arc<[TrackCandidate]>;

/// Page size Spotify search is queried with.
pub const DEFAULT_PAGE_SIZE: usize = 20;
/// Results considered per term before filtering.
pub const DEFAULT_MAX_RESULTS: usize = 20;
/// Largest `limit` Spotify search accepts.
pub const MAX_PAGE_SIZE: usize = 50;

/// Resolver settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub market: String,
    /// Results requested per search call; clamped to `1..=MAX_PAGE_SIZE`.
    pub page_size: usize,
    /// Upper bound on results fetched for one term, across pages.
    pub max_results: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            market: DEFAULT_MARKET.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// Term-keyed cache of resolved matches, one per processing run.
///
/// Keys are the exact term strings (case-sensitive). Entries are never
/// evicted.
#[derive(Debug, Default)]
pub struct TermCache {
    slots: Mutex<HashMap<String, Arc<OnceCell<Matches>>>>,
}

impl TermCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cell for `term`, created empty on first request.
    fn slot(&self, term: &str) -> Arc<OnceCell<Matches>> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        match slots.get(term) {
            Some(slot) => Arc::clone(slot),
            None => {
                let slot = Arc::new(OnceCell::new());
                slots.insert(term.to_owned(), Arc::clone(&slot));
                slot
            }
        }
    }

    /// The cached matches for `term`, if it has been resolved.
    pub fn get(&self, term: &str) -> Option<Matches> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(term).and_then(|slot| slot.get().cloned())
    }

    /// Number of resolved terms.
    pub fn len(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| slot.initialized()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Caching adapter from search terms to exact-title matches.
pub struct TrackResolver {
    search: Arc<dyn TrackSearch>,
    config: ResolverConfig,
    cache: TermCache,
    queries: AtomicUsize,
}

impl TrackResolver {
    pub fn new(search: Arc<dyn TrackSearch>, config: ResolverConfig) -> Self {
        let config = ResolverConfig {
            page_size: config.page_size.clamp(1, MAX_PAGE_SIZE),
            ..config
        };
        Self {
            search,
            config,
            cache: TermCache::new(),
            queries: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Tracks titled exactly `term` (ignoring case), most popular first.
    ///
    /// Only the first call for a given term reaches the search
    /// collaborator; later and concurrent calls share its result.
    pub async fn resolve(&self, term: &str) -> Matches {
        let slot = self.cache.slot(term);
        if let Some(hit) = slot.get() {
            tracing::debug!(term, matches = hit.len(), "cache hit");
            return Arc::clone(hit);
        }

        let matches = slot.get_or_init(|| self.fetch_exact(term)).await;
        Arc::clone(matches)
    }

    /// Number of distinct terms resolved so far.
    pub fn cached_terms(&self) -> usize {
        self.cache.len()
    }

    /// Number of search calls issued so far (one per page).
    pub fn external_queries(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }

    pub fn cache(&self) -> &TermCache {
        &self.cache
    }

    async fn fetch_exact(&self, term: &str) -> Matches {
        tracing::debug!(term, search = self.search.name(), "cache miss");

        let Some(mut tracks) = self.fetch_pages(term).await else {
            return Arc::from(Vec::new());
        };

        tracks.truncate(self.config.max_results);
        tracks.sort_by(|a, b| b.popularity.cmp(&a.popularity));

        let wanted = term.to_lowercase();
        let exact: Vec<TrackCandidate> = tracks
            .into_iter()
            .filter(|track| track.name.to_lowercase() == wanted)
            .collect();

        tracing::debug!(term, matches = exact.len(), "exact matches found");
        exact.into()
    }

    /// Page through search results until `max_results` are collected or a
    /// short page signals exhaustion. `None` if any page fails, even after
    /// earlier pages succeeded.
    async fn fetch_pages(&self, term: &str) -> Option<Vec<TrackCandidate>> {
        let page_size = self.config.page_size;
        let mut tracks = Vec::new();
        let mut offset = 0;

        while tracks.len() < self.config.max_results {
            let query = SearchQuery {
                term: term.to_owned(),
                market: self.config.market.clone(),
                limit: page_size,
                offset,
            };
            self.queries.fetch_add(1, Ordering::Relaxed);

            match self.search.search(&query).await {
                Ok(page) => {
                    let exhausted = page.len() < page_size;
                    tracks.extend(page);
                    if exhausted {
                        break;
                    }
                    offset += page_size;
                }
                Err(e) => {
                    tracing::warn!(
                        term,
                        offset,
                        error = %format!("{e:#}"),
                        "search failed, treating term as unmatched"
                    );
                    return None;
                }
            }
        }

        Some(tracks)
    }
}

impl std::fmt::Debug for TrackResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackResolver")
            .field("search", &self.search.name())
            .field("config", &self.config)
            .field("cached_terms", &self.cached_terms())
            .finish()
    }
}
