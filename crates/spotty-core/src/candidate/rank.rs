//! Scoring and ordering of playlist candidates.

use serde::Serialize;

use super::PlaylistCandidate;

/// A candidate with its score and 1-based position in the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCandidate {
    pub rank: usize,
    pub score: u64,
    pub candidate: PlaylistCandidate,
}

/// Score candidates by total popularity, best first.
///
/// The sort is stable: candidates with equal scores keep the order they
/// were built in, which is composition priority order.
pub fn rank(candidates: Vec<PlaylistCandidate>) -> Vec<RankedCandidate> {
    let mut scored: Vec<(u64, PlaylistCandidate)> = candidates
        .into_iter()
        .map(|candidate| (candidate.popularity_score(), candidate))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (score, candidate))| RankedCandidate {
            rank: i + 1,
            score,
            candidate,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::ResolvedGroup;
    use crate::composition::Group;
    use crate::track::TrackCandidate;

    fn candidate(popularities: &[u32]) -> PlaylistCandidate {
        let tracks = popularities
            .iter()
            .enumerate()
            .map(|(i, &popularity)| ResolvedGroup {
                group: Group {
                    start: i,
                    end: i + 1,
                    text: format!("t{i}"),
                },
                track: TrackCandidate {
                    id: format!("id{i}"),
                    name: format!("t{i}"),
                    popularity,
                    artist: "A".to_string(),
                    uri: format!("spotify:track:id{i}"),
                },
            })
            .collect();
        PlaylistCandidate { tracks }
    }

    #[test]
    fn empty_input() {
        assert!(rank(Vec::new()).is_empty());
    }

    #[test]
    fn highest_score_first() {
        let ranked = rank(vec![candidate(&[10, 10]), candidate(&[90]), candidate(&[30, 30, 30])]);
        let scores: Vec<u64> = ranked.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![90, 90, 20]);
        let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn ties_keep_build_order() {
        let ranked = rank(vec![candidate(&[50]), candidate(&[25, 25])]);
        assert_eq!(ranked[0].candidate.len(), 1);
        assert_eq!(ranked[1].candidate.len(), 2);
    }
}
