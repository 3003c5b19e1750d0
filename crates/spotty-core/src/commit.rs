//! Writing a chosen candidate to a playlist.

use thiserror::Error;

use crate::candidate::PlaylistCandidate;
use crate::search::PlaylistStore;

/// Most URIs a single add-tracks call may carry.
pub const MAX_TRACKS_PER_ADD: usize = 100;

/// Where a committed candidate goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistTarget {
    /// Create a new playlist with this name.
    New(String),
    /// Append to an existing playlist with this ID.
    Existing(String),
}

/// Errors raised while committing a candidate.
#[derive(Debug, Error)]
pub enum CommitError {
    #[error(
        "playlist has {count} tracks, more than the {max} allowed in one add; refusing to commit"
    )]
    TooManyTracks { count: usize, max: usize },

    #[error("playlist update failed: {0:#}")]
    Store(anyhow::Error),
}

/// Add `candidate`'s tracks to `target`, creating the playlist if needed.
///
/// Candidates longer than [`MAX_TRACKS_PER_ADD`] are rejected before any
/// call reaches the store; they are never split or truncated. Returns the
/// ID of the playlist written to.
pub async fn commit_candidate(
    store: &dyn PlaylistStore,
    target: &PlaylistTarget,
    candidate: &PlaylistCandidate,
) -> Result<String, CommitError> {
    if candidate.len() > MAX_TRACKS_PER_ADD {
        tracing::error!(
            tracks = candidate.len(),
            max = MAX_TRACKS_PER_ADD,
            "candidate exceeds the add-tracks limit"
        );
        return Err(CommitError::TooManyTracks {
            count: candidate.len(),
            max: MAX_TRACKS_PER_ADD,
        });
    }

    let playlist_id = match target {
        PlaylistTarget::New(name) => store
            .create_playlist(name)
            .await
            .map_err(CommitError::Store)?,
        PlaylistTarget::Existing(id) => id.clone(),
    };

    let uris = candidate.uris();
    tracing::info!(playlist_id = %playlist_id, tracks = uris.len(), "adding tracks");
    store
        .add_tracks(&playlist_id, &uris)
        .await
        .map_err(CommitError::Store)?;

    Ok(playlist_id)
}
