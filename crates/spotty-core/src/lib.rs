//! Sentence-to-playlist engine.
//!
//! ```text
//! text --text::sentences--> Sentence { tokens }
//!      --composition::enumerate--> Vec<Composition>   (most groups first)
//!      --candidate::build_candidates--> Vec<PlaylistCandidate>
//!           |
//!           +-- resolver::TrackResolver --(cache miss)--> dyn TrackSearch
//!      --candidate::rank--> Vec<RankedCandidate>
//!      --commit::commit_candidate--> dyn PlaylistStore
//! ```

pub mod candidate;
pub mod commit;
pub mod composition;
pub mod pipeline;
pub mod resolver;
pub mod search;
pub mod text;
pub mod track;
