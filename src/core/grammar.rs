//! Sequence grammar
//!
//! A sequence of length `L = 2N` is grammar-valid when its running height never
//! goes negative, never exceeds `N`, never exceeds the number of steps left to
//! return to zero, and ends at exactly zero.

use super::{Sequence, Symbol};
use std::fmt;

/// Default maximum height
pub const DEFAULT_MAX_HEIGHT: usize = 4;

/// Error type for grammar-invalid sequences
///
/// Positions are 0-based; the `Display` form reports them 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    InvalidLength { expected: usize, got: usize },
    InvalidAlphabet { position: usize, found: char },
    HeightUnderflow { position: usize },
    HeightOverflow { position: usize, max_height: usize },
    UnreachableZero { position: usize },
    NonZeroEnding { height: i32 },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { expected, .. } => write!(f, "Length must be {expected}."),
            Self::InvalidAlphabet { .. } => write!(f, "Only (, ), and * are allowed."),
            Self::HeightUnderflow { position } => {
                write!(f, "Check the prefix height at position {}.", position + 1)
            }
            Self::HeightOverflow {
                position,
                max_height,
            } => write!(
                f,
                "Prefix height exceeds {max_height} at position {}.",
                position + 1
            ),
            Self::UnreachableZero { position } => {
                write!(f, "Too high to finish by position {}.", position + 1)
            }
            Self::NonZeroEnding { .. } => write!(f, "Final height must return to 0."),
        }
    }
}

impl std::error::Error for GrammarError {}

/// The bracket grammar for a fixed maximum height `N`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grammar {
    max_height: usize,
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HEIGHT)
    }
}

impl Grammar {
    /// Create a grammar with maximum height `max_height` and length `2 * max_height`
    ///
    /// # Panics
    /// Panics in debug mode if `max_height` is zero
    #[must_use]
    pub const fn new(max_height: usize) -> Self {
        debug_assert!(max_height > 0, "max height must be positive");
        Self { max_height }
    }

    /// Maximum height `N`
    #[inline]
    #[must_use]
    pub const fn max_height(self) -> usize {
        self.max_height
    }

    /// Sequence length `L = 2N`
    #[inline]
    #[must_use]
    pub const fn seq_len(self) -> usize {
        2 * self.max_height
    }

    /// Steps remaining after placing a symbol at `position`
    #[inline]
    #[must_use]
    pub const fn remaining_after(self, position: usize) -> usize {
        self.seq_len() - (position + 1)
    }

    /// Whether `height` is still allowed after placing a symbol at `position`
    ///
    /// Shared by the validator, the generator's pruning, and the live display.
    #[inline]
    #[must_use]
    pub fn height_allowed(self, position: usize, height: i32) -> bool {
        height >= 0
            && height as usize <= self.max_height
            && height as usize <= self.remaining_after(position)
    }

    /// Validate raw guess text and parse it into a [`Sequence`]
    ///
    /// # Errors
    /// Returns the first failing category in this order: length, alphabet,
    /// then per-position underflow / overflow / unreachable-zero, then a
    /// non-zero final height.
    ///
    /// # Examples
    /// ```
    /// use brackle::core::{Grammar, GrammarError};
    ///
    /// let grammar = Grammar::default();
    /// assert!(grammar.validate("(*()*)**").is_ok());
    /// assert!(matches!(
    ///     grammar.validate("(*()*)*x"),
    ///     Err(GrammarError::InvalidAlphabet { position: 7, found: 'x' })
    /// ));
    /// ```
    pub fn validate(self, text: &str) -> Result<Sequence, GrammarError> {
        let got = text.chars().count();
        if got != self.seq_len() {
            return Err(GrammarError::InvalidLength {
                expected: self.seq_len(),
                got,
            });
        }

        let sequence = Sequence::parse(text)
            .map_err(|(position, found)| GrammarError::InvalidAlphabet { position, found })?;

        self.check(&sequence)?;
        Ok(sequence)
    }

    /// Validate an already-parsed sequence
    ///
    /// # Errors
    /// Same categories as [`Grammar::validate`], minus the alphabet check.
    pub fn check(self, sequence: &Sequence) -> Result<(), GrammarError> {
        if sequence.len() != self.seq_len() {
            return Err(GrammarError::InvalidLength {
                expected: self.seq_len(),
                got: sequence.len(),
            });
        }

        let mut height = 0i32;
        for (position, symbol) in sequence.symbols().iter().enumerate() {
            height += symbol.delta();
            self.check_step(position, height)?;
        }

        if height != 0 {
            return Err(GrammarError::NonZeroEnding { height });
        }
        Ok(())
    }

    /// Classify the running height after `position`
    ///
    /// # Errors
    /// Returns the grammar error the height violates, if any.
    pub fn check_step(self, position: usize, height: i32) -> Result<(), GrammarError> {
        if height < 0 {
            return Err(GrammarError::HeightUnderflow { position });
        }
        if height as usize > self.max_height {
            return Err(GrammarError::HeightOverflow {
                position,
                max_height: self.max_height,
            });
        }
        if height as usize > self.remaining_after(position) {
            return Err(GrammarError::UnreachableZero { position });
        }
        Ok(())
    }

    /// Whether a partial guess can still be completed into a valid sequence
    #[must_use]
    pub fn prefix_ok(self, symbols: &[Symbol]) -> bool {
        let mut height = 0i32;
        symbols.iter().enumerate().all(|(position, symbol)| {
            height += symbol.delta();
            position < self.seq_len() && self.height_allowed(position, height)
        })
    }
}
