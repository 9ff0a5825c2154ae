//! Height-difference feedback
//!
//! Feedback compares height profiles, not characters:
//! - Hit  = same height at this position
//! - Near = height differs by 1 or 2
//! - Far  = height differs by 3 or more
//!
//! Two different symbols can still score a hit when their running heights agree.

use std::fmt;

/// Feedback class for one position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    Hit,
    Near,
    Far,
}

impl Feedback {
    /// Classify a single absolute height difference
    #[inline]
    #[must_use]
    pub const fn from_diff(diff: u32) -> Self {
        match diff {
            0 => Self::Hit,
            1..=2 => Self::Near,
            _ => Self::Far,
        }
    }

    /// Classify position `i` of `guess` against `answer`
    ///
    /// # Panics
    /// Panics if `i` is out of bounds for either profile
    #[inline]
    #[must_use]
    pub fn at(guess: &[i32], answer: &[i32], i: usize) -> Self {
        Self::from_diff(guess[i].abs_diff(answer[i]))
    }

    /// Classify every position of two equal-length profiles
    ///
    /// # Examples
    /// ```
    /// use brackle::core::Feedback;
    ///
    /// let guess = [1, 2, 3, 4];
    /// let answer = [1, 1, 0, 0];
    /// assert_eq!(
    ///     Feedback::classify(&guess, &answer),
    ///     vec![Feedback::Hit, Feedback::Near, Feedback::Far, Feedback::Far]
    /// );
    /// ```
    #[must_use]
    pub fn classify(guess: &[i32], answer: &[i32]) -> Vec<Self> {
        debug_assert_eq!(guess.len(), answer.len(), "profile lengths differ");
        guess
            .iter()
            .zip(answer)
            .map(|(g, a)| Self::from_diff(g.abs_diff(*a)))
            .collect()
    }

    /// Storage code used by persisted day records
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Hit => "g",
            Self::Near => "y",
            Self::Far => "x",
        }
    }

    /// Parse a storage code; anything unknown is `None`
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "g" => Some(Self::Hit),
            "y" => Some(Self::Near),
            "x" => Some(Self::Far),
            _ => None,
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hit => "Hit",
            Self::Near => "Off by 1–2",
            Self::Far => "Off by ≥3",
        }
    }

    /// Emoji square for share grids
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Hit => '🟩',
            Self::Near => '🟨',
            Self::Far => '⬛',
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Count positions whose heights are exactly equal
///
/// Independent of the near/far bands. Equals the profile length iff the
/// profiles are identical, which for this grammar means the sequences are.
#[must_use]
pub fn match_count(guess: &[i32], answer: &[i32]) -> usize {
    guess.iter().zip(answer).filter(|(g, a)| g == a).count()
}
