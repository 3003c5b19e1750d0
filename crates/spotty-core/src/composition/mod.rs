//! Bounded compositions of a token sequence.
//!
//! A composition splits the tokens into ordered, contiguous, non-empty
//! groups of at most `max_group_size` tokens each. Every token is covered
//! exactly once and the original order is kept.

pub mod counter;
pub mod strategy;

use serde::Serialize;
use thiserror::Error;

pub use counter::count_compositions;
pub use strategy::{Layout, Strategy, StrategyParseError};

/// Errors raised while enumerating compositions.
#[derive(Debug, Error)]
pub enum CompositionError {
    #[error("max group size must be at least 1")]
    ZeroMaxGroupSize,
}

/// A contiguous run of tokens rendered as one search term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Group {
    /// Index of the first token in the group.
    pub start: usize,
    /// One past the index of the last token.
    pub end: usize,
    /// The tokens joined by single spaces.
    pub text: String,
}

impl Group {
    pub fn token_count(&self) -> usize {
        self.end - self.start
    }
}

/// An ordered, gapless split of a token sequence into groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Composition {
    groups: Vec<Group>,
}

impl Composition {
    /// Render a layout of group sizes against `tokens`.
    ///
    /// The sizes must sum to `tokens.len()`.
    pub fn from_layout(tokens: &[String], layout: &[usize]) -> Self {
        let mut groups = Vec::with_capacity(layout.len());
        let mut start = 0;
        for &size in layout {
            let end = start + size;
            groups.push(Group {
                start,
                end,
                text: tokens[start..end].join(" "),
            });
            start = end;
        }
        Self { groups }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The group strings, left to right.
    pub fn terms(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.text.as_str()).collect()
    }
}

/// Enumerate every composition of `tokens`, finest-grained first.
///
/// Compositions are stably sorted by group count, descending: splits into
/// many short phrases come before coarser ones because short phrases are
/// far more likely to be exact track titles.
pub fn enumerate(
    tokens: &[String],
    max_group_size: usize,
    strategy: Strategy,
) -> Result<Vec<Composition>, CompositionError> {
    if max_group_size == 0 {
        return Err(CompositionError::ZeroMaxGroupSize);
    }

    let mut compositions: Vec<Composition> = strategy
        .layouts(tokens.len(), max_group_size)
        .iter()
        .map(|layout| Composition::from_layout(tokens, layout))
        .collect();
    compositions.sort_by_key(|c| std::cmp::Reverse(c.len()));

    tracing::debug!(
        tokens = tokens.len(),
        max_group_size,
        %strategy,
        compositions = compositions.len(),
        "enumerated compositions"
    );
    Ok(compositions)
}

/// Order-independent form of a composition set, for comparing strategies.
pub fn normalize(compositions: &[Composition]) -> Vec<Vec<String>> {
    let mut normalized: Vec<Vec<String>> = compositions
        .iter()
        .map(|c| c.groups.iter().map(|g| g.text.clone()).collect())
        .collect();
    normalized.sort();
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_owned).collect()
    }

    #[test]
    fn two_tokens_max_two_in_priority_order() {
        let tokens = words("a b");
        let compositions = enumerate(&tokens, 2, Strategy::Stack).unwrap();
        let terms: Vec<Vec<&str>> = compositions.iter().map(|c| c.terms()).collect();
        assert_eq!(terms, vec![vec!["a", "b"], vec!["a b"]]);
        assert_eq!(count_compositions(2, 2), 2);
    }

    #[test]
    fn zero_max_group_size_is_rejected() {
        let err = enumerate(&words("a b"), 0, Strategy::BottomUp).unwrap_err();
        assert!(matches!(err, CompositionError::ZeroMaxGroupSize));
    }

    #[test]
    fn counter_matches_enumeration() {
        let tokens = words("one two three four five six seven eight nine");
        for n in 0..=tokens.len() {
            for max in 1..=5 {
                for strategy in Strategy::ALL {
                    let got = enumerate(&tokens[..n], max, strategy).unwrap();
                    assert_eq!(
                        got.len() as u128,
                        count_compositions(n, max),
                        "n={n} max={max} strategy={strategy}"
                    );
                }
            }
        }
    }

    #[test]
    fn strategies_produce_the_same_set() {
        let tokens = words("the quick brown fox jumps over the lazy dog");
        for max in 1..=4 {
            let reference = normalize(&enumerate(&tokens, max, Strategy::Stack).unwrap());
            for strategy in [Strategy::Memoized, Strategy::BottomUp] {
                let got = normalize(&enumerate(&tokens, max, strategy).unwrap());
                assert_eq!(got, reference, "max={max} strategy={strategy}");
            }
        }
    }

    #[test]
    fn groups_reconstruct_the_tokens() {
        let tokens = words("here comes the sun and I say it's all right");
        for strategy in Strategy::ALL {
            for composition in enumerate(&tokens, 3, strategy).unwrap() {
                let mut cursor = 0;
                let mut rebuilt = Vec::new();
                for group in composition.groups() {
                    assert_eq!(group.start, cursor, "gap or overlap in {composition:?}");
                    assert!((1..=3).contains(&group.token_count()));
                    rebuilt.extend(group.text.split(' ').map(str::to_owned));
                    cursor = group.end;
                }
                assert_eq!(cursor, tokens.len());
                assert_eq!(rebuilt, tokens);
            }
        }
    }

    #[test]
    fn finer_compositions_come_first() {
        let tokens = words("a b c d e f");
        for strategy in Strategy::ALL {
            let compositions = enumerate(&tokens, 3, strategy).unwrap();
            assert_eq!(compositions[0].len(), tokens.len());
            for pair in compositions.windows(2) {
                assert!(pair[0].len() >= pair[1].len(), "out of order under {strategy}");
            }
        }
    }

    #[test]
    fn empty_tokens_give_one_empty_composition() {
        let compositions = enumerate(&[], 4, Strategy::Memoized).unwrap();
        assert_eq!(compositions.len(), 1);
        assert!(compositions[0].is_empty());
    }

    #[test]
    fn composition_serializes_as_group_list() {
        let composition = Composition::from_layout(&words("let it be"), &[1, 2]);
        let json = serde_json::to_value(&composition).unwrap();
        assert_eq!(json[0]["text"], "let");
        assert_eq!(json[1]["text"], "it be");
        assert_eq!(json[1]["start"], 1);
    }
}
