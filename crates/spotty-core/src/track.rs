//! The fixed-shape track record every component works with.

use serde::{Deserialize, Serialize};
use spotty_api::models::TrackObject;

/// Artist name used when the service credits nobody.
pub const UNKNOWN_ARTIST: &str = "Unknown";

/// A track returned by the search collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackCandidate {
    pub id: String,
    pub name: String,
    /// Higher is more popular (Spotify reports 0..=100).
    pub popularity: u32,
    /// Primary artist.
    pub artist: String,
    /// Playable URI, e.g. `spotify:track:...`.
    pub uri: String,
}

impl From<TrackObject> for TrackCandidate {
    fn from(track: TrackObject) -> Self {
        let artist = track
            .primary_artist()
            .unwrap_or(UNKNOWN_ARTIST)
            .to_owned();
        Self {
            id: track.id,
            name: track.name,
            popularity: track.popularity,
            artist,
            uri: track.uri,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spotty_api::models::ArtistObject;

    fn object(artists: &[&str]) -> TrackObject {
        TrackObject {
            id: "1".to_string(),
            name: "Help!".to_string(),
            popularity: 64,
            artists: artists
                .iter()
                .map(|name| ArtistObject {
                    name: name.to_string(),
                })
                .collect(),
            uri: "spotify:track:1".to_string(),
        }
    }

    #[test]
    fn takes_first_artist() {
        let track = TrackCandidate::from(object(&["The Beatles", "George Martin"]));
        assert_eq!(track.artist, "The Beatles");
        assert_eq!(track.popularity, 64);
        assert_eq!(track.uri, "spotify:track:1");
    }

    #[test]
    fn falls_back_to_unknown_artist() {
        let track = TrackCandidate::from(object(&[]));
        assert_eq!(track.artist, UNKNOWN_ARTIST);
    }
}
