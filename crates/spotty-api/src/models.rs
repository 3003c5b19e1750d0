//! Wire types for the Spotify Web API responses and request bodies.
//!
//! Only the fields spotty reads are modelled; everything else in the JSON
//! is ignored by serde.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Body of `GET /search?type=track`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub tracks: Option<TrackPage>,
}

/// One page of track results.
///
/// Spotify occasionally returns `null` in place of an unavailable track, so
/// items are optional; [`TrackPage::into_tracks`] drops the holes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackPage {
    #[serde(default)]
    pub items: Vec<Option<TrackObject>>,
    #[serde(default)]
    pub total: u64,
}

impl TrackPage {
    /// The present items, in page order.
    pub fn into_tracks(self) -> Vec<TrackObject> {
        self.items.into_iter().flatten().collect()
    }
}

/// A track as returned by search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default)]
    pub artists: Vec<ArtistObject>,
    pub uri: String,
}

impl TrackObject {
    /// Name of the first credited artist, if any.
    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(|a| a.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistObject {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Users and playlists
// ---------------------------------------------------------------------------

/// Body of `GET /me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Request body of `POST /users/{id}/playlists`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlaylist {
    pub name: String,
    pub public: bool,
}

/// A playlist as returned on creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistObject {
    pub id: String,
    pub name: String,
}

/// Request body of `POST /playlists/{id}/tracks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

/// Response of any playlist mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_ignores_unknown_fields() {
        let json = r#"{
            "tracks": {
                "href": "https://api.spotify.com/v1/search?offset=0",
                "items": [{
                    "id": "3BQHpFgAp4l80e1XslIjNI",
                    "name": "Yesterday",
                    "popularity": 77,
                    "explicit": false,
                    "artists": [{"id": "3WrFJ7ztbogyGnTHbHJFl2", "name": "The Beatles"}],
                    "uri": "spotify:track:3BQHpFgAp4l80e1XslIjNI"
                }],
                "limit": 20,
                "offset": 0,
                "total": 1
            }
        }"#;
        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        let page = parsed.tracks.expect("tracks page");
        assert_eq!(page.total, 1);
        let tracks = page.into_tracks();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].name, "Yesterday");
        assert_eq!(tracks[0].primary_artist(), Some("The Beatles"));
    }

    #[test]
    fn null_items_do_not_sink_the_page() {
        let json = r#"{
            "tracks": {
                "items": [
                    null,
                    {"id": "1", "name": "Yesterday", "popularity": 70, "uri": "spotify:track:1"},
                    null
                ],
                "total": 3
            }
        }"#;
        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        let tracks = parsed.tracks.expect("tracks page").into_tracks();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, "1");
        assert_eq!(tracks[0].name, "Yesterday");
    }

    #[test]
    fn missing_tracks_key_is_empty() {
        let parsed: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.tracks.is_none());
    }

    #[test]
    fn track_without_artists_or_popularity() {
        let json = r#"{"id": "x", "name": "Local", "uri": "spotify:local:x"}"#;
        let track: TrackObject = serde_json::from_str(json).unwrap();
        assert_eq!(track.popularity, 0);
        assert!(track.primary_artist().is_none());
    }
}
