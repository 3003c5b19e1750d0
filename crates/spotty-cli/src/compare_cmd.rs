//! `spotty compare` command: run every enumeration strategy on the same
//! synthetic sentence, check that they agree, and time them.

use std::time::{Duration, Instant};

use anyhow::{Result, bail};

use spotty_core::composition::{Strategy, count_compositions, enumerate, normalize};

/// Above this many compositions a comparison run is likely to take a while.
const LARGE_RUN: u128 = 1_000_000;

/// Outcome of one strategy on the synthetic sentence.
#[derive(Debug, Clone)]
pub struct StrategyRun {
    pub strategy: Strategy,
    pub compositions: usize,
    pub elapsed: Duration,
}

/// `w1 w2 ... wN`.
fn synthetic_tokens(words: usize) -> Vec<String> {
    (1..=words).map(|i| format!("w{i}")).collect()
}

/// Enumerate with every strategy and cross-check the results.
///
/// Fails if any strategy's count disagrees with the counter or if the
/// normalized composition sets differ between strategies.
pub fn compare_strategies(words: usize, max_words: usize) -> Result<Vec<StrategyRun>> {
    let tokens = synthetic_tokens(words);
    let expected = count_compositions(words, max_words);
    if expected > LARGE_RUN {
        tracing::warn!(words, max_words, compositions = %expected, "large comparison run");
    }

    let mut reference: Option<(Strategy, Vec<Vec<String>>)> = None;
    let mut runs = Vec::with_capacity(Strategy::ALL.len());

    for strategy in Strategy::ALL {
        let start = Instant::now();
        let compositions = enumerate(&tokens, max_words, strategy)?;
        let elapsed = start.elapsed();
        tracing::info!(%strategy, compositions = compositions.len(), ?elapsed, "strategy finished");

        if compositions.len() as u128 != expected {
            bail!(
                "{strategy} produced {} compositions, counter predicts {expected}",
                compositions.len()
            );
        }

        let normalized = normalize(&compositions);
        match &reference {
            None => reference = Some((strategy, normalized)),
            Some((first, expected_set)) => {
                if *expected_set != normalized {
                    bail!("{strategy} and {first} produced different compositions");
                }
            }
        }

        runs.push(StrategyRun {
            strategy,
            compositions: compositions.len(),
            elapsed,
        });
    }

    Ok(runs)
}

/// Run the compare command.
pub fn run_compare(words: usize, max_words: usize) -> Result<()> {
    let runs = compare_strategies(words, max_words)?;

    println!("Sentence: {words} token(s), max {max_words} word(s) per group");
    println!("Counter:  {}", count_compositions(words, max_words));
    println!();
    println!("{:<12} {:>14} {:>12}", "STRATEGY", "COMPOSITIONS", "TIME");
    println!("{}", "-".repeat(40));
    for run in &runs {
        println!(
            "{:<12} {:>14} {:>10.3}ms",
            run.strategy.to_string(),
            run.compositions,
            run.elapsed.as_secs_f64() * 1000.0
        );
    }
    println!();
    println!("All strategies agree.");
    Ok(())
}
