//! Collaborator interfaces for track search and playlist mutation.
//!
//! ```text
//! TrackResolver --search(query)--> &dyn TrackSearch   --> Spotify /search
//! commit_candidate --create/add--> &dyn PlaylistStore --> Spotify playlists
//! ```
//!
//! [`SpotifyAdapter`] implements both against the Web API; tests plug in
//! in-memory stubs.

pub mod spotify;

use anyhow::Result;
use async_trait::async_trait;

use crate::track::TrackCandidate;

pub use spotify::SpotifyAdapter;

/// Market every search is scoped to unless configured otherwise.
pub const DEFAULT_MARKET: &str = "US";

/// One page request against the search collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Exact track title to look for.
    pub term: String,
    /// Market (ISO country code) the results must be playable in.
    pub market: String,
    /// Page size.
    pub limit: usize,
    /// Number of results to skip.
    pub offset: usize,
}

/// Track search collaborator.
#[async_trait]
pub trait TrackSearch: Send + Sync {
    /// Human-readable name for logs (e.g. "spotify").
    fn name(&self) -> &str;

    /// Fetch one page of tracks for `query`.
    ///
    /// A page shorter than `query.limit` means the results are exhausted.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<TrackCandidate>>;
}

/// Playlist mutation collaborator.
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// Create an empty playlist and return its ID.
    async fn create_playlist(&self, name: &str) -> Result<String>;

    /// Append tracks to a playlist in one call.
    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()>;
}

const _: () = {
    fn _assert_object_safe(_: &dyn TrackSearch, _: &dyn PlaylistStore) {}
};
