//! Deterministic daily answer selection
//!
//! The answer for a UTC calendar day is
//! `universe[fnv1a32("BRACKLE|" + "YYYY-MM-DD") % universe.len()]`.
//! The hash constants, the salt, and the universe order together define the
//! answer history; changing any of them changes every past answer.

use super::Universe;
use crate::core::Sequence;
use chrono::{Days, NaiveDate, Utc};

/// Salt prefixed to the date before hashing
pub const DAILY_SALT: &str = "BRACKLE|";

/// Date format used for keys and hashing
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over the bytes of `text`
///
/// # Examples
/// ```
/// use brackle::universe::fnv1a32;
///
/// assert_eq!(fnv1a32(""), 0x811c_9dc5);
/// assert_eq!(fnv1a32("BRACKLE|2024-01-01"), 386_965_887);
/// ```
#[must_use]
pub fn fnv1a32(text: &str) -> u32 {
    text.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Current UTC calendar date
#[must_use]
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a `YYYY-MM-DD` day key
///
/// # Errors
/// Returns the chrono parse error for malformed input.
pub fn parse_day(text: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
}

/// The calendar day before `date`
#[must_use]
pub fn previous_day(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(1))
}

/// Picks one universe member per calendar date
pub struct DailySelector<'a> {
    universe: &'a Universe,
}

impl<'a> DailySelector<'a> {
    /// Create a selector over a prebuilt universe
    #[must_use]
    pub const fn new(universe: &'a Universe) -> Self {
        Self { universe }
    }

    /// Universe index for a date
    #[must_use]
    pub fn index_for(&self, date: NaiveDate) -> usize {
        let key = format!("{DAILY_SALT}{}", date.format(DATE_FORMAT));
        // `Universe` is never empty
        fnv1a32(&key) as usize % self.universe.len()
    }

    /// The answer for a date
    #[must_use]
    pub fn answer_for(&self, date: NaiveDate) -> &'a Sequence {
        &self.universe.members()[self.index_for(date)]
    }

    /// The answer for a `YYYY-MM-DD` string
    ///
    /// # Errors
    /// Returns the chrono parse error for malformed dates.
    pub fn answer_for_str(&self, date: &str) -> Result<&'a Sequence, chrono::ParseError> {
        parse_day(date).map(|d| self.answer_for(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(text: &str) -> NaiveDate {
        parse_day(text).unwrap()
    }

    #[test]
    fn fnv_known_values() {
        assert_eq!(fnv1a32(""), 0x811c_9dc5);
        assert_eq!(fnv1a32("a"), 0xe40c_292c);
        assert_eq!(fnv1a32("BRACKLE|2024-01-01"), 386_965_887);
        assert_eq!(fnv1a32("BRACKLE|2024-01-02"), 403_743_506);
    }

    #[test]
    fn reference_answers() {
        let universe = Universe::default();
        let selector = DailySelector::new(&universe);

        assert_eq!(selector.index_for(day("2024-01-01")), 201);
        assert_eq!(selector.answer_for(day("2024-01-01")).to_string(), "*(()(*))");
        assert_eq!(selector.index_for(day("2024-01-02")), 54);
        assert_eq!(selector.answer_for(day("2024-01-02")).to_string(), "(()**)()");
        assert_eq!(
            selector.answer_for_str("2025-06-15").unwrap().to_string(),
            "*(*())()"
        );
    }

    #[test]
    fn answer_is_stable_and_member() {
        let universe = Universe::default();
        let selector = DailySelector::new(&universe);
        let date = day("2026-10-19");

        let first = selector.answer_for(date);
        for _ in 0..10 {
            assert_eq!(selector.answer_for(date), first);
        }
        assert!(universe.contains(first));
    }

    #[test]
    fn answer_for_bad_date() {
        let universe = Universe::default();
        let selector = DailySelector::new(&universe);
        assert!(selector.answer_for_str("2024-13-01").is_err());
        assert!(selector.answer_for_str("yesterday").is_err());
    }

    #[test]
    fn tiny_universe_still_has_daily_answers() {
        let universe = Universe::new(crate::core::Grammar::new(1));
        let selector = DailySelector::new(&universe);
        let answer = selector.answer_for(day("2024-01-01"));
        assert!(universe.contains(answer));
    }

    #[test]
    fn previous_day_crosses_boundaries() {
        assert_eq!(previous_day(day("2024-03-01")), Some(day("2024-02-29")));
        assert_eq!(previous_day(day("2025-01-01")), Some(day("2024-12-31")));
    }
}
