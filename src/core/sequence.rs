//! Symbol sequences and their height profiles
//!
//! A sequence is an ordered string over three symbols:
//! - `(` = Up (height +1)
//! - `*` = Flat (height unchanged)
//! - `)` = Down (height -1)
//!
//! The height profile is the running sum after each position.

use std::fmt;

/// One symbol of a Brackle sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Up,
    Flat,
    Down,
}

impl Symbol {
    /// Enumeration order used by the answer generator
    ///
    /// The order is load-bearing: the daily answer is picked by index.
    pub const SEARCH_ORDER: [Self; 3] = [Self::Up, Self::Flat, Self::Down];

    /// Parse a symbol from its character form
    #[inline]
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '(' => Some(Self::Up),
            '*' => Some(Self::Flat),
            ')' => Some(Self::Down),
            _ => None,
        }
    }

    /// Character rendering of this symbol
    #[inline]
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Up => '(',
            Self::Flat => '*',
            Self::Down => ')',
        }
    }

    /// Height change contributed by this symbol
    #[inline]
    #[must_use]
    pub const fn delta(self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Flat => 0,
            Self::Down => -1,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Running height after each position of a sequence
pub type HeightProfile = Vec<i32>;

/// Compute the running height profile of any symbol slice
///
/// Defined for every input, not only grammar-valid ones, so it can drive the
/// live display of a half-typed guess.
///
/// # Examples
/// ```
/// use brackle::core::{Symbol, height_profile};
///
/// let profile = height_profile(&[Symbol::Up, Symbol::Flat, Symbol::Down]);
/// assert_eq!(profile, vec![1, 1, 0]);
/// ```
#[must_use]
pub fn height_profile(symbols: &[Symbol]) -> HeightProfile {
    symbols
        .iter()
        .scan(0i32, |height, symbol| {
            *height += symbol.delta();
            Some(*height)
        })
        .collect()
}

/// An ordered sequence of symbols
///
/// A `Sequence` is only a string over the alphabet; grammar validity is checked
/// separately by [`crate::core::Grammar`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Sequence(Vec<Symbol>);

impl Sequence {
    #[must_use]
    pub const fn new(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }

    /// Parse a sequence from text
    ///
    /// Returns the 0-based index and character of the first symbol outside the
    /// alphabet on failure.
    ///
    /// # Errors
    /// Returns `(position, char)` for the first invalid character.
    pub fn parse(text: &str) -> Result<Self, (usize, char)> {
        text.chars()
            .enumerate()
            .map(|(i, ch)| Symbol::from_char(ch).ok_or((i, ch)))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    #[inline]
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of `Up` symbols (the open-bracket count)
    #[must_use]
    pub fn up_count(&self) -> usize {
        self.0.iter().filter(|&&s| s == Symbol::Up).count()
    }

    #[must_use]
    pub fn height_profile(&self) -> HeightProfile {
        height_profile(&self.0)
    }

    pub(crate) fn push(&mut self, symbol: Symbol) {
        self.0.push(symbol);
    }

    pub(crate) fn pop(&mut self) -> Option<Symbol> {
        self.0.pop()
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.0 {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

impl From<Vec<Symbol>> for Sequence {
    fn from(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(text: &str) -> Sequence {
        Sequence::parse(text).unwrap()
    }

    #[test]
    fn symbol_char_mapping() {
        for symbol in Symbol::SEARCH_ORDER {
            assert_eq!(Symbol::from_char(symbol.as_char()), Some(symbol));
        }
        assert_eq!(Symbol::from_char('x'), None);
        assert_eq!(Symbol::from_char('['), None);
    }

    #[test]
    fn parse_reports_first_bad_char() {
        assert_eq!(Sequence::parse("((x)y"), Err((2, 'x')));
        assert_eq!(Sequence::parse("").map(|s| s.len()), Ok(0));
    }

    #[test]
    fn display_matches_input() {
        assert_eq!(seq("(*()*)**").to_string(), "(*()*)**");
    }

    #[test]
    fn height_profile_simple() {
        assert_eq!(seq("(*()*)**").height_profile(), vec![1, 1, 2, 1, 1, 0, 0, 0]);
        assert_eq!(seq("(((())))").height_profile(), vec![1, 2, 3, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn height_profile_defined_for_invalid_input() {
        // Negative heights are allowed in the profile itself
        assert_eq!(seq("))(").height_profile(), vec![-1, -2, -1]);
        assert!(seq("").height_profile().is_empty());
    }

    #[test]
    fn height_profile_step_relation() {
        let s = seq("(()*)(*)");
        let profile = s.height_profile();
        for i in 1..profile.len() {
            assert_eq!(profile[i], profile[i - 1] + s.symbols()[i].delta());
        }
        assert_eq!(profile[0], s.symbols()[0].delta());
    }

    #[test]
    fn up_count() {
        assert_eq!(seq("********").up_count(), 0);
        assert_eq!(seq("()()()()").up_count(), 4);
        assert_eq!(seq("**(**)**").up_count(), 1);
    }

    #[test]
    fn push_pop_clear() {
        let mut s = Sequence::default();
        s.push(Symbol::Up);
        s.push(Symbol::Down);
        assert_eq!(s.to_string(), "()");
        assert_eq!(s.pop(), Some(Symbol::Down));
        s.clear();
        assert!(s.is_empty());
    }
}
