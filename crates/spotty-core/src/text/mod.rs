//! Sentence splitting and tokenization.
//!
//! A sentence ends at a run of `.`, `!` or `?` that is followed by
//! whitespace or the end of the text. Tokens are whitespace-separated words
//! after every ASCII punctuation mark except the apostrophe is removed, so
//! "Don't" stays one token while "rock-n-roll" becomes "rocknroll".

use serde::Serialize;

const TERMINATORS: &[char] = &['.', '!', '?'];

/// One sentence of input text with its tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    /// The sentence text with trailing terminators removed.
    pub text: String,
    /// Ordered tokens; never empty.
    pub tokens: Vec<String>,
}

/// Split raw text into sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if !TERMINATORS.contains(&c) {
            continue;
        }

        while let Some(&next) = chars.peek() {
            if !TERMINATORS.contains(&next) {
                break;
            }
            current.push(next);
            chars.next();
        }

        let at_boundary = chars.peek().is_none_or(|next| next.is_whitespace());
        if at_boundary {
            push_sentence(&mut sentences, &current);
            current.clear();
        }
    }
    push_sentence(&mut sentences, &current);

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let cleaned = raw.trim().trim_end_matches(TERMINATORS).trim_end();
    if !cleaned.is_empty() {
        sentences.push(cleaned.to_owned());
    }
}

/// Split one sentence into tokens.
pub fn tokenize(sentence: &str) -> Vec<String> {
    let cleaned: String = sentence
        .chars()
        .filter(|c| *c == '\'' || !c.is_ascii_punctuation())
        .collect();
    cleaned.split_whitespace().map(str::to_owned).collect()
}

/// Split text into sentences and tokenize each one.
///
/// Sentences that contain nothing but punctuation are dropped.
pub fn sentences(text: &str) -> Vec<Sentence> {
    split_sentences(text)
        .into_iter()
        .filter_map(|text| {
            let tokens = tokenize(&text);
            if tokens.is_empty() {
                tracing::warn!(sentence = %text, "sentence has no words, skipping");
                return None;
            }
            Some(Sentence { text, tokens })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_sentences() {
        assert!(split_sentences("").is_empty());
        assert!(sentences("   \n\t ").is_empty());
    }

    #[test]
    fn splits_on_terminator_followed_by_whitespace() {
        let got = split_sentences("Hello there. How are you? I am fine!");
        assert_eq!(got, vec!["Hello there", "How are you", "I am fine"]);
    }

    #[test]
    fn terminator_inside_word_does_not_split() {
        let got = split_sentences("Meet me at 3.30 today. Bye");
        assert_eq!(got, vec!["Meet me at 3.30 today", "Bye"]);
    }

    #[test]
    fn terminator_runs_are_absorbed() {
        let got = split_sentences("Wait... what?! No way");
        assert_eq!(got, vec!["Wait", "what", "No way"]);
    }

    #[test]
    fn text_without_terminator_is_one_sentence() {
        assert_eq!(split_sentences("  just some words  "), vec!["just some words"]);
    }

    #[test]
    fn tokenize_strips_punctuation_but_keeps_apostrophes() {
        let got = tokenize("Don't stop, believin' (ok)");
        assert_eq!(got, vec!["Don't", "stop", "believin'", "ok"]);
    }

    #[test]
    fn tokenize_joins_hyphenated_words() {
        assert_eq!(tokenize("rock-n-roll"), vec!["rocknroll"]);
    }

    #[test]
    fn tokenize_keeps_non_ascii_letters() {
        assert_eq!(tokenize("Café über alles"), vec!["Café", "über", "alles"]);
    }

    #[test]
    fn punctuation_only_sentences_are_dropped() {
        let got = sentences("Hello world. -- ! Goodbye");
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].tokens, vec!["Hello", "world"]);
        assert_eq!(got[1].tokens, vec!["Goodbye"]);
    }
}
