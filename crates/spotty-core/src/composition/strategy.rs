//! Interchangeable enumeration strategies.
//!
//! Each strategy returns layouts: the list of group sizes of every
//! composition of `n` tokens, in no particular order. They exist side by
//! side so they can be cross-checked against each other and timed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Group sizes of one composition, left to right.
pub type Layout = Vec<usize>;

/// How compositions are enumerated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Depth-first over an explicit work stack of partial layouts.
    #[default]
    Stack,
    /// Top-down, memoized by start index, driven by a frame stack.
    Memoized,
    /// Table of completions filled from the last index back to 0.
    BottomUp,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Stack, Strategy::Memoized, Strategy::BottomUp];

    /// Enumerate every layout of `n` tokens with groups of 1..=`max`.
    ///
    /// `max` must be at least 1.
    pub fn layouts(self, n: usize, max: usize) -> Vec<Layout> {
        match self {
            Self::Stack => stack_layouts(n, max),
            Self::Memoized => memoized_layouts(n, max),
            Self::BottomUp => bottom_up_layouts(n, max),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Stack => "stack",
            Self::Memoized => "memoized",
            Self::BottomUp => "bottom-up",
        };
        f.write_str(s)
    }
}

impl FromStr for Strategy {
    type Err = StrategyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stack" => Ok(Self::Stack),
            "memoized" => Ok(Self::Memoized),
            "bottom-up" | "bottom_up" => Ok(Self::BottomUp),
            other => Err(StrategyParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Strategy`] string.
#[derive(Debug, Clone)]
pub struct StrategyParseError(pub String);

impl fmt::Display for StrategyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid strategy: {:?} (expected stack, memoized, or bottom-up)",
            self.0
        )
    }
}

impl std::error::Error for StrategyParseError {}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn stack_layouts(n: usize, max: usize) -> Vec<Layout> {
    let mut layouts = Vec::new();
    let mut work: Vec<(usize, Layout)> = vec![(0, Vec::new())];

    while let Some((start, sizes)) = work.pop() {
        if start == n {
            layouts.push(sizes);
            continue;
        }
        for end in start + 1..=(start + max).min(n) {
            let mut next = Vec::with_capacity(sizes.len() + 1);
            next.extend_from_slice(&sizes);
            next.push(end - start);
            work.push((end, next));
        }
    }

    layouts
}

fn memoized_layouts(n: usize, max: usize) -> Vec<Layout> {
    // memo[i] holds every completion of tokens[i..].
    let mut memo: Vec<Option<Vec<Layout>>> = vec![None; n + 1];
    memo[n] = Some(vec![Vec::new()]);
    let mut frames = vec![0usize];

    while let Some(&start) = frames.last() {
        if memo[start].is_some() {
            frames.pop();
            continue;
        }

        let reach = (start + max).min(n);
        let unresolved: Vec<usize> = (start + 1..=reach)
            .filter(|&end| memo[end].is_none())
            .collect();
        if !unresolved.is_empty() {
            frames.extend(unresolved);
            continue;
        }

        let mut completions = Vec::new();
        for end in start + 1..=reach {
            if let Some(tails) = &memo[end] {
                completions.extend(tails.iter().map(|tail| prepend(end - start, tail)));
            }
        }
        memo[start] = Some(completions);
        frames.pop();
    }

    memo.swap_remove(0).unwrap_or_default()
}

fn bottom_up_layouts(n: usize, max: usize) -> Vec<Layout> {
    let mut table: Vec<Vec<Layout>> = vec![Vec::new(); n + 1];
    table[n].push(Vec::new());

    for start in (0..n).rev() {
        let mut completions = Vec::new();
        for end in start + 1..=(start + max).min(n) {
            completions.extend(table[end].iter().map(|tail| prepend(end - start, tail)));
        }
        table[start] = completions;
    }

    table.swap_remove(0)
}

fn prepend(size: usize, tail: &[usize]) -> Layout {
    let mut layout = Vec::with_capacity(tail.len() + 1);
    layout.push(size);
    layout.extend_from_slice(tail);
    layout
}
