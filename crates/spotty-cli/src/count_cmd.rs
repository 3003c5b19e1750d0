//! `spotty count` command: how many compositions each sentence has.

use anyhow::{Result, bail};

use spotty_core::composition::count_compositions;
use spotty_core::text;

/// Per-sentence figures printed by `spotty count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceCount {
    pub sentence: String,
    pub tokens: usize,
    pub compositions: u128,
}

/// Count compositions for every sentence of `input`. No network access.
pub fn count_sentences(input: &str, max_words: usize) -> Result<Vec<SentenceCount>> {
    if max_words == 0 {
        bail!("--max-words must be at least 1");
    }

    Ok(text::sentences(input)
        .into_iter()
        .map(|s| SentenceCount {
            compositions: count_compositions(s.tokens.len(), max_words),
            tokens: s.tokens.len(),
            sentence: s.text,
        })
        .collect())
}

/// Run the count command.
pub fn run_count(input: &str, max_words: usize) -> Result<()> {
    let counts = count_sentences(input, max_words)?;
    if counts.is_empty() {
        println!("No sentences found.");
        return Ok(());
    }

    println!("{:<4} {:>7} {:>14}  SENTENCE", "#", "TOKENS", "COMPOSITIONS");
    println!("{}", "-".repeat(60));
    for (i, count) in counts.iter().enumerate() {
        println!(
            "{:<4} {:>7} {:>14}  {}",
            i + 1,
            count.tokens,
            count.compositions,
            count.sentence
        );
    }

    let total = counts
        .iter()
        .fold(0u128, |acc, c| acc.saturating_add(c.compositions));
    println!();
    println!("Max words per group: {max_words}");
    println!("Total compositions:  {total}");
    Ok(())
}
