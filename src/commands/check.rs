//! Check command
//!
//! Scores one guess against a day's answer without touching the saved game.

use crate::core::{Feedback, GrammarError, HeightProfile, Sequence, match_count};
use crate::universe::{DailySelector, Universe};
use chrono::NaiveDate;

/// Result of checking one guess
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub guess: Sequence,
    pub heights: HeightProfile,
    /// Only filled in when the answer was asked for
    pub answer: Option<Sequence>,
    pub feedback: Vec<Feedback>,
    pub match_count: usize,
    pub solved: bool,
}

/// Validate `guess` and score it against the answer for `date`
///
/// # Errors
///
/// Returns the grammar error if the guess is not a valid sequence.
pub fn check_guess(
    universe: &Universe,
    date: NaiveDate,
    guess: &str,
    reveal: bool,
) -> Result<CheckReport, GrammarError> {
    let guess = universe.grammar().validate(guess.trim())?;
    let answer = DailySelector::new(universe).answer_for(date);

    let heights = guess.height_profile();
    let answer_heights = answer.height_profile();

    Ok(CheckReport {
        feedback: Feedback::classify(&heights, &answer_heights),
        match_count: match_count(&heights, &answer_heights),
        solved: &guess == answer,
        answer: reveal.then(|| answer.clone()),
        guess,
        heights,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn scores_against_daily_answer() {
        let universe = Universe::default();
        let report = check_guess(&universe, day(), "(*()*)**", false).unwrap();
        assert_eq!(report.match_count, 4);
        assert!(!report.solved);
        assert!(report.answer.is_none());
        assert_eq!(report.feedback.len(), 8);
    }

    #[test]
    fn recognizes_answer() {
        let universe = Universe::default();
        let report = check_guess(&universe, day(), " *(()(*)) ", true).unwrap();
        assert!(report.solved);
        assert_eq!(report.match_count, 8);
        assert_eq!(
            report.answer.map(|a| a.to_string()).as_deref(),
            Some("*(()(*))")
        );
    }

    #[test]
    fn rejects_invalid_guess() {
        let universe = Universe::default();
        assert!(matches!(
            check_guess(&universe, day(), "((((", false),
            Err(GrammarError::InvalidLength { got: 4, .. })
        ));
    }
}
