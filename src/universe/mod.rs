//! Answer universe for Brackle
//!
//! The universe is generated at startup instead of being embedded: every
//! grammar-valid sequence is enumerated, then trivial ones are removed.
//! Generation order is fixed (Up, Flat, Down) because the daily answer is
//! chosen by index.

pub mod daily;
mod generator;

pub use daily::{DailySelector, fnv1a32, parse_day, previous_day, today_utc};
pub use generator::{all_valid, is_boring};

use crate::core::{Grammar, Sequence};

/// Canonical alternating sequence reserved as a non-answer
pub const RESERVED_NON_ANSWER: &str = "()()()()";

/// Filtered, ordered list of possible answers for one grammar
///
/// Built once per process and read-only afterwards. Never empty.
#[derive(Debug, Clone)]
pub struct Universe {
    grammar: Grammar,
    members: Vec<Sequence>,
}

impl Universe {
    /// Generate the filtered universe for `grammar`
    ///
    /// Grammars too small to have a non-trivial sequence keep every valid
    /// one instead; the all-flat sequence is always valid.
    #[must_use]
    pub fn new(grammar: Grammar) -> Self {
        let all = all_valid(grammar);
        let members: Vec<Sequence> = all.iter().filter(|seq| !is_boring(seq)).cloned().collect();
        let members = if members.is_empty() { all } else { members };
        Self { grammar, members }
    }

    #[inline]
    #[must_use]
    pub const fn grammar(&self) -> Grammar {
        self.grammar
    }

    #[inline]
    #[must_use]
    pub fn members(&self) -> &[Sequence] {
        &self.members
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Sequence> {
        self.members.get(index)
    }

    #[must_use]
    pub fn contains(&self, sequence: &Sequence) -> bool {
        self.members.contains(sequence)
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::new(Grammar::default())
    }
}
