//! Spotify Web API implementation of the collaborator traits.

use anyhow::{Context, Result};
use async_trait::async_trait;

use spotty_api::SpotifyClient;
use spotty_api::endpoints::{playlists, search};

use super::{PlaylistStore, SearchQuery, TrackSearch};
use crate::track::TrackCandidate;

/// Adapter from [`SpotifyClient`] to [`TrackSearch`] and [`PlaylistStore`].
#[derive(Debug, Clone)]
pub struct SpotifyAdapter {
    client: SpotifyClient,
}

impl SpotifyAdapter {
    pub fn new(client: SpotifyClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TrackSearch for SpotifyAdapter {
    fn name(&self) -> &str {
        "spotify"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<TrackCandidate>> {
        let items = search::search_tracks(
            &self.client,
            &query.term,
            &query.market,
            query.limit,
            query.offset,
        )
        .await
        .with_context(|| format!("search for {:?} failed", query.term))?;

        Ok(items.into_iter().map(TrackCandidate::from).collect())
    }
}

#[async_trait]
impl PlaylistStore for SpotifyAdapter {
    async fn create_playlist(&self, name: &str) -> Result<String> {
        let user = playlists::current_user(&self.client)
            .await
            .context("unable to retrieve Spotify user ID")?;
        let playlist = playlists::create_playlist(&self.client, &user.id, name)
            .await
            .with_context(|| format!("failed to create playlist {name:?}"))?;
        Ok(playlist.id)
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        playlists::add_tracks(&self.client, playlist_id, uris)
            .await
            .with_context(|| format!("failed to add tracks to playlist {playlist_id}"))?;
        Ok(())
    }
}
