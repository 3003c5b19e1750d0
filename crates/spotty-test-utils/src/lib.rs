//! Shared test doubles for spotty integration tests.
//!
//! - [`StubCatalog`]: in-memory [`TrackSearch`] that counts calls per term.
//! - [`RecordingStore`]: in-memory [`PlaylistStore`] that records mutations.
//! - [`http::StubApi`]: a local HTTP server speaking the subset of the
//!   Spotify Web API that `spotty-api` calls.

pub mod http;

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::{Result, bail};
use async_trait::async_trait;

use spotty_core::search::{PlaylistStore, SearchQuery, TrackSearch};
use spotty_core::track::TrackCandidate;

/// Build a track with a predictable id and URI.
pub fn track(name: &str, popularity: u32) -> TrackCandidate {
    let slug = name.to_lowercase().replace(' ', "-");
    TrackCandidate {
        id: format!("{slug}-{popularity}"),
        name: name.to_owned(),
        popularity,
        artist: format!("{name} Band"),
        uri: format!("spotify:track:{slug}-{popularity}"),
    }
}

// ---------------------------------------------------------------------------
// Search stub
// ---------------------------------------------------------------------------

/// A searchable track catalog.
///
/// Search behaves like the real service: every track whose title contains
/// the term (ignoring case) is returned, in catalog order, paginated by
/// the query's offset and limit.
#[derive(Debug, Default)]
pub struct StubCatalog {
    tracks: Vec<TrackCandidate>,
    failing: HashSet<String>,
    delay: Option<Duration>,
    calls: Mutex<HashMap<String, usize>>,
    total: AtomicUsize,
}

impl StubCatalog {
    pub fn new(tracks: Vec<TrackCandidate>) -> Self {
        Self {
            tracks,
            ..Self::default()
        }
    }

    /// Make every search for `term` fail.
    pub fn with_failing_term(mut self, term: &str) -> Self {
        self.failing.insert(term.to_owned());
        self
    }

    /// Sleep before answering, to keep concurrent lookups in flight.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Search calls issued for `term`.
    pub fn calls_for(&self, term: &str) -> usize {
        let calls = self.calls.lock().expect("calls lock poisoned");
        calls.get(term).copied().unwrap_or(0)
    }

    /// Search calls issued for any term.
    pub fn total_calls(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrackSearch for StubCatalog {
    fn name(&self) -> &str {
        "stub"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<TrackCandidate>> {
        {
            let mut calls = self.calls.lock().expect("calls lock poisoned");
            *calls.entry(query.term.clone()).or_default() += 1;
        }
        self.total.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(&query.term) {
            bail!("stub search failure for {:?}", query.term);
        }

        let needle = query.term.to_lowercase();
        Ok(self
            .tracks
            .iter()
            .filter(|t| t.name.to_lowercase().contains(&needle))
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Playlist stub
// ---------------------------------------------------------------------------

/// Records playlist mutations instead of performing them.
#[derive(Debug, Default)]
pub struct RecordingStore {
    created: Mutex<Vec<String>>,
    added: Mutex<Vec<(String, Vec<String>)>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of playlists created, in call order.
    pub fn created(&self) -> Vec<String> {
        self.created.lock().expect("created lock poisoned").clone()
    }

    /// `(playlist_id, uris)` of every add call, in call order.
    pub fn added(&self) -> Vec<(String, Vec<String>)> {
        self.added.lock().expect("added lock poisoned").clone()
    }
}

#[async_trait]
impl PlaylistStore for RecordingStore {
    async fn create_playlist(&self, name: &str) -> Result<String> {
        let mut created = self.created.lock().expect("created lock poisoned");
        created.push(name.to_owned());
        Ok(format!("playlist-{}", created.len()))
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        self.added
            .lock()
            .expect("added lock poisoned")
            .push((playlist_id.to_owned(), uris.to_vec()));
        Ok(())
    }
}
