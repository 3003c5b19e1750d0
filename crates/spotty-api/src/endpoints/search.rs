//! Track search.

use crate::client::{ApiError, SpotifyClient};
use crate::models::{SearchResponse, TrackObject, TrackPage};

/// Build the `q` parameter for an exact-title track search.
pub fn track_query(term: &str) -> String {
    format!("track:\"{term}\"")
}

/// Fetch one page of tracks whose title matches `term`.
///
/// Returns the page items in the order the service ranked them, skipping
/// `null` entries. A response without a `tracks` object is an empty page.
pub async fn search_tracks(
    client: &SpotifyClient,
    term: &str,
    market: &str,
    limit: usize,
    offset: usize,
) -> Result<Vec<TrackObject>, ApiError> {
    let query = [
        ("q", track_query(term)),
        ("type", "track".to_owned()),
        ("market", market.to_owned()),
        ("limit", limit.to_string()),
        ("offset", offset.to_string()),
    ];

    let response: SearchResponse = client.get_json("search", &query).await?;
    Ok(response.tracks.map(TrackPage::into_tracks).unwrap_or_default())
}
