//! End-to-end run: text in, ranked candidates per sentence out.

use serde::Serialize;
use thiserror::Error;

use crate::candidate::{RankedCandidate, build_candidates, rank};
use crate::composition::{CompositionError, Strategy, count_compositions, enumerate};
use crate::resolver::TrackResolver;
use crate::text;

/// Default largest group, in tokens.
pub const DEFAULT_MAX_GROUP_SIZE: usize = 4;
/// Default number of compositions resolved concurrently.
pub const DEFAULT_LOOKAHEAD: usize = 4;

/// Settings for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub max_group_size: usize,
    pub strategy: Strategy,
    pub lookahead: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_group_size: DEFAULT_MAX_GROUP_SIZE,
            strategy: Strategy::default(),
            lookahead: DEFAULT_LOOKAHEAD,
        }
    }
}

/// Errors that end a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Composition(#[from] CompositionError),

    #[error("no combination of track titles matches sentence {index}: {sentence:?}")]
    Unmatched { index: usize, sentence: String },
}

/// Ranked candidates for one sentence.
#[derive(Debug, Clone, Serialize)]
pub struct SentencePlaylists {
    pub sentence: String,
    pub tokens: Vec<String>,
    /// Compositions tried, as predicted by the counter.
    pub compositions: u128,
    /// Best first; never empty.
    pub candidates: Vec<RankedCandidate>,
}

/// Run every sentence of `input` through enumeration, resolution and
/// ranking.
///
/// Sentences are processed in order. The first sentence that yields no
/// candidate at all stops the run with [`PipelineError::Unmatched`];
/// later sentences are not attempted.
pub async fn run_pipeline(
    input: &str,
    config: &PipelineConfig,
    resolver: &TrackResolver,
) -> Result<Vec<SentencePlaylists>, PipelineError> {
    let sentences = text::sentences(input);
    tracing::info!(sentences = sentences.len(), "split input text");

    let mut results = Vec::with_capacity(sentences.len());
    for (index, sentence) in sentences.into_iter().enumerate() {
        let expected = count_compositions(sentence.tokens.len(), config.max_group_size);
        tracing::info!(
            index,
            tokens = sentence.tokens.len(),
            compositions = %expected,
            max_group_size = config.max_group_size,
            "enumerating compositions"
        );

        let compositions = enumerate(&sentence.tokens, config.max_group_size, config.strategy)?;
        let candidates = build_candidates(resolver, &compositions, config.lookahead).await;

        if candidates.is_empty() {
            tracing::error!(index, sentence = %sentence.text, "no valid set of tracks matched");
            return Err(PipelineError::Unmatched {
                index,
                sentence: sentence.text,
            });
        }

        tracing::info!(index, candidates = candidates.len(), "found potential playlists");
        results.push(SentencePlaylists {
            sentence: sentence.text,
            tokens: sentence.tokens,
            compositions: expected,
            candidates: rank(candidates),
        });
    }

    Ok(results)
}
