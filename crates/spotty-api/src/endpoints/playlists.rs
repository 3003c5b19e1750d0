//! Current-user lookup and playlist mutation.

use crate::client::{ApiError, SpotifyClient};
use crate::models::{
    AddTracksRequest, NewPlaylist, PlaylistObject, SnapshotResponse, UserProfile,
};

/// Fetch the profile of the user who owns the access token.
pub async fn current_user(client: &SpotifyClient) -> Result<UserProfile, ApiError> {
    let user: UserProfile = client.get_json("me", &[]).await?;
    tracing::info!(user_id = %user.id, "Spotify user ID retrieved");
    Ok(user)
}

/// Create a private playlist for `user_id`.
pub async fn create_playlist(
    client: &SpotifyClient,
    user_id: &str,
    name: &str,
) -> Result<PlaylistObject, ApiError> {
    let body = NewPlaylist {
        name: name.to_owned(),
        public: false,
    };
    tracing::info!(user_id = %user_id, name = %name, "creating playlist");
    let playlist: PlaylistObject = client
        .post_json(&format!("users/{user_id}/playlists"), &body)
        .await?;
    tracing::info!(playlist_id = %playlist.id, name = %playlist.name, "playlist created");
    Ok(playlist)
}

/// Append `uris` to a playlist in a single call.
///
/// The service accepts at most 100 URIs per call; enforcing that limit is
/// the caller's job.
pub async fn add_tracks(
    client: &SpotifyClient,
    playlist_id: &str,
    uris: &[String],
) -> Result<SnapshotResponse, ApiError> {
    let body = AddTracksRequest {
        uris: uris.to_vec(),
    };
    tracing::info!(playlist_id = %playlist_id, count = uris.len(), "adding tracks to playlist");
    client
        .post_json(&format!("playlists/{playlist_id}/tracks"), &body)
        .await
}
