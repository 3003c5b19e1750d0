//! Turning compositions into playlist candidates.
//!
//! Compositions are consumed in priority order. Each one either resolves
//! every group to a track, becoming a [`PlaylistCandidate`], or is dropped
//! as soon as one group has no exact match.

pub mod rank;

use futures::StreamExt;
use serde::Serialize;

use crate::composition::{Composition, Group};
use crate::resolver::TrackResolver;
use crate::track::TrackCandidate;

pub use rank::{RankedCandidate, rank};

/// Compositions between two progress log lines.
pub const PROGRESS_EVERY: usize = 100;

/// A group with the track chosen for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedGroup {
    pub group: Group,
    pub track: TrackCandidate,
}

/// One track per group of a fully resolved composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistCandidate {
    pub tracks: Vec<ResolvedGroup>,
}

impl PlaylistCandidate {
    /// Sum of the chosen tracks' popularity.
    pub fn popularity_score(&self) -> u64 {
        self.tracks
            .iter()
            .map(|resolved| u64::from(resolved.track.popularity))
            .sum()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Track URIs in playlist order.
    pub fn uris(&self) -> Vec<String> {
        self.tracks.iter().map(|r| r.track.uri.clone()).collect()
    }
}

/// Resolve every group of `composition`, most popular match per group.
///
/// Groups are resolved left to right and resolution stops at the first
/// group without a match, returning `None`.
pub async fn resolve_composition(
    resolver: &TrackResolver,
    composition: &Composition,
) -> Option<PlaylistCandidate> {
    let mut tracks = Vec::with_capacity(composition.len());
    for group in composition.groups() {
        let matches = resolver.resolve(&group.text).await;
        let best = matches.first()?;
        tracks.push(ResolvedGroup {
            group: group.clone(),
            track: best.clone(),
        });
    }
    Some(PlaylistCandidate { tracks })
}

/// Resolve compositions in order, keeping the ones that fully match.
///
/// Up to `lookahead` compositions are in flight at once; results are still
/// consumed in the order given, so the output keeps composition priority.
pub async fn build_candidates(
    resolver: &TrackResolver,
    compositions: &[Composition],
    lookahead: usize,
) -> Vec<PlaylistCandidate> {
    let total = compositions.len();
    let mut candidates = Vec::new();

    let mut resolved = futures::stream::iter(compositions)
        .map(|composition| resolve_composition(resolver, composition))
        .buffered(lookahead.max(1));

    let mut done = 0usize;
    while let Some(outcome) = resolved.next().await {
        done += 1;
        if let Some(candidate) = outcome {
            candidates.push(candidate);
        }

        if done % PROGRESS_EVERY == 0 || done == total {
            let pct = done as f64 * 100.0 / total.max(1) as f64;
            tracing::info!(
                done,
                total,
                pct = %format!("{pct:.2}"),
                candidates = candidates.len(),
                cached_terms = resolver.cached_terms(),
                searches = resolver.external_queries(),
                "resolving compositions"
            );
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::{Strategy, enumerate};
    use crate::resolver::ResolverConfig;
    use crate::search::{SearchQuery, TrackSearch};
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Returns every catalog track whose title contains the term.
    struct Catalog(Vec<TrackCandidate>);

    #[async_trait]
    impl TrackSearch for Catalog {
        fn name(&self) -> &str {
            "catalog"
        }

        async fn search(&self, query: &SearchQuery) -> Result<Vec<TrackCandidate>> {
            let needle = query.term.to_lowercase();
            Ok(self
                .0
                .iter()
                .filter(|t| t.name.to_lowercase().contains(&needle))
                .skip(query.offset)
                .take(query.limit)
                .cloned()
                .collect())
        }
    }

    fn track(name: &str, popularity: u32) -> TrackCandidate {
        TrackCandidate {
            id: format!("{name}:{popularity}"),
            name: name.to_string(),
            popularity,
            artist: "Artist".to_string(),
            uri: format!("spotify:track:{name}:{popularity}"),
        }
    }

    fn resolver(tracks: Vec<TrackCandidate>) -> TrackResolver {
        TrackResolver::new(Arc::new(Catalog(tracks)), ResolverConfig::default())
    }

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_owned).collect()
    }

    #[tokio::test]
    async fn drops_compositions_with_an_unmatched_group() {
        let resolver = resolver(vec![track("let it", 20), track("be", 30)]);
        let compositions = enumerate(&tokens("let it be"), 3, Strategy::Stack).unwrap();

        let candidates = build_candidates(&resolver, &compositions, 1).await;

        assert_eq!(candidates.len(), 1);
        let terms: Vec<&str> = candidates[0]
            .tracks
            .iter()
            .map(|r| r.group.text.as_str())
            .collect();
        assert_eq!(terms, vec!["let it", "be"]);
    }

    #[tokio::test]
    async fn picks_most_popular_exact_match_per_group() {
        let resolver = resolver(vec![
            track("Help", 10),
            track("Help", 75),
            track("Help Me", 99),
        ]);
        let compositions = enumerate(&tokens("Help"), 1, Strategy::Stack).unwrap();

        let candidates = build_candidates(&resolver, &compositions, 2).await;

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].len(), 1);
        assert_eq!(candidates[0].tracks[0].track.popularity, 75);
        assert_eq!(candidates[0].popularity_score(), 75);
    }

    #[tokio::test]
    async fn keeps_composition_priority_order_with_lookahead() {
        let resolver = resolver(vec![
            track("a", 1),
            track("b", 1),
            track("c", 1),
            track("a b", 1),
            track("b c", 1),
            track("a b c", 1),
        ]);
        let compositions = enumerate(&tokens("a b c"), 3, Strategy::BottomUp).unwrap();

        let candidates = build_candidates(&resolver, &compositions, 8).await;

        assert_eq!(candidates.len(), compositions.len());
        for (candidate, composition) in candidates.iter().zip(&compositions) {
            let terms: Vec<&str> = candidate.tracks.iter().map(|r| r.group.text.as_str()).collect();
            assert_eq!(terms, composition.terms());
        }
    }

    #[tokio::test]
    async fn short_circuits_on_first_unmatched_group() {
        let resolver = resolver(vec![track("b", 1)]);
        let composition = Composition::from_layout(&tokens("a b"), &[1, 1]);

        assert!(resolve_composition(&resolver, &composition).await.is_none());
        assert!(resolver.cache().get("a").is_some());
        assert!(resolver.cache().get("b").is_none(), "b should never be looked up");
    }

    #[test]
    fn uris_follow_playlist_order() {
        let candidate = PlaylistCandidate {
            tracks: vec![
                ResolvedGroup {
                    group: Group {
                        start: 0,
                        end: 1,
                        text: "x".to_string(),
                    },
                    track: track("x", 1),
                },
                ResolvedGroup {
                    group: Group {
                        start: 1,
                        end: 2,
                        text: "y".to_string(),
                    },
                    track: track("y", 2),
                },
            ],
        };
        assert_eq!(candidate.uris(), vec!["spotify:track:x:1", "spotify:track:y:2"]);
        assert_eq!(candidate.popularity_score(), 3);
    }
}
