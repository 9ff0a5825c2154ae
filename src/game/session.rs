//! Guess/reveal state machine for one calendar day
//!
//! States:
//! - Editing: the buffer accepts symbols (0..=L of them)
//! - AwaitingReveal: a guess missed; exactly one hint cell of that round must
//!   be revealed before more input is accepted
//! - Won / Lost: terminal, every action except the view toggle is ignored

use super::MAX_TRIES;
use crate::core::{Feedback, Grammar, GrammarError, HeightProfile, Sequence, Symbol, match_count};
use chrono::NaiveDate;
use std::fmt;

/// One submitted guess and its per-position reveal state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub guess: Sequence,
    pub heights: HeightProfile,
    /// `None` until revealed; a revealed class never changes
    pub revealed: Vec<Option<Feedback>>,
}

impl Round {
    #[must_use]
    pub fn new(guess: Sequence) -> Self {
        let heights = guess.height_profile();
        let revealed = vec![None; guess.len()];
        Self {
            guess,
            heights,
            revealed,
        }
    }

    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|r| r.is_some()).count()
    }
}

/// Mutable play state for one day, exactly as persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySession {
    pub date: NaiveDate,
    pub rounds: Vec<Round>,
    pub buffer: Sequence,
    pub awaiting_reveal: bool,
    pub done: bool,
    pub won: bool,
    pub last_match_count: Option<usize>,
    pub recorded: bool,
    pub show_heights: bool,
}

impl DaySession {
    /// Fresh state for `date`
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            rounds: Vec::new(),
            buffer: Sequence::default(),
            awaiting_reveal: false,
            done: false,
            won: false,
            last_match_count: None,
            recorded: false,
            show_heights: false,
        }
    }

    /// Rounds submitted so far
    #[inline]
    #[must_use]
    pub fn tries_used(&self) -> usize {
        self.rounds.len()
    }
}

/// Derived state of a [`DaySession`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Editing,
    AwaitingReveal,
    Won,
    Lost,
}

impl SessionState {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Error type for rejected session actions
///
/// None of these mutate state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    Grammar(GrammarError),
    SessionTerminal,
    RevealPending,
    NoRevealPending,
    BufferFull,
    BufferEmpty,
    RevealOutOfRange { round: usize, position: usize },
    AlreadyRevealed { round: usize, position: usize },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grammar(GrammarError::InvalidLength { got, expected }) if got < expected => {
                write!(f, "Current row is not full.")
            }
            Self::Grammar(e) => write!(f, "Invalid input: {e}"),
            Self::SessionTerminal => write!(f, "Today's puzzle is already finished."),
            Self::RevealPending => write!(f, "Reveal a hint first: pick any cell of the last row."),
            Self::NoRevealPending => write!(f, "No hint to reveal right now."),
            Self::BufferFull => write!(f, "Current row is full."),
            Self::BufferEmpty => write!(f, "Current row is empty."),
            Self::RevealOutOfRange { round, position } => write!(
                f,
                "Row {}, column {} cannot be revealed.",
                round + 1,
                position + 1
            ),
            Self::AlreadyRevealed { round, position } => write!(
                f,
                "Row {}, column {} is already revealed.",
                round + 1,
                position + 1
            ),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<GrammarError> for SessionError {
    fn from(err: GrammarError) -> Self {
        Self::Grammar(err)
    }
}

/// Result of a submitted round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Won,
    Lost,
    AwaitingReveal,
}

/// An accepted state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Edited,
    Submitted {
        match_count: usize,
        outcome: SubmitOutcome,
    },
    Revealed {
        round: usize,
        position: usize,
        feedback: Feedback,
    },
    ViewToggled,
}

/// Read-only view of the session for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub date: NaiveDate,
    pub state: SessionState,
    pub rounds: Vec<Round>,
    pub buffer: String,
    pub tries_used: usize,
    pub max_tries: usize,
    pub last_match_count: Option<usize>,
    pub show_heights: bool,
    /// Only present once the session is terminal
    pub answer: Option<Sequence>,
}

/// Data needed to build share text outside the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareSummary {
    pub date: NaiveDate,
    pub won: bool,
    pub tries_used: usize,
    pub max_tries: usize,
    pub match_counts: Vec<usize>,
    pub grid: Vec<Vec<Feedback>>,
}

/// One day's state machine bound to that day's answer
#[derive(Debug, Clone)]
pub struct GuessSession {
    grammar: Grammar,
    answer: Sequence,
    answer_heights: HeightProfile,
    day: DaySession,
}

impl GuessSession {
    /// Bind a (possibly restored) day record to its answer
    #[must_use]
    pub fn new(grammar: Grammar, answer: Sequence, mut day: DaySession) -> Self {
        let answer_heights = answer.height_profile();

        // Repair records that cannot arise from play: the outcome follows
        // from the rounds, and a reveal is only pending while the latest
        // round still has a hidden cell
        day.won = day.rounds.last().is_some_and(|r| r.guess == answer);
        day.done = day.won || day.tries_used() >= MAX_TRIES;
        let hidden_cell = day
            .rounds
            .last()
            .is_some_and(|r| r.revealed.iter().any(Option::is_none));
        if day.done || !hidden_cell {
            day.awaiting_reveal = false;
        }
        // The ledger still refuses a second commit for the same date
        if !day.done {
            day.recorded = false;
        }

        if day.last_match_count.is_none()
            && let Some(last) = day.rounds.last()
        {
            day.last_match_count = Some(match_count(&last.heights, &answer_heights));
        }
        if day.won {
            day.last_match_count = Some(grammar.seq_len());
        }
        Self {
            grammar,
            answer,
            answer_heights,
            day,
        }
    }

    #[inline]
    #[must_use]
    pub const fn grammar(&self) -> Grammar {
        self.grammar
    }

    #[inline]
    #[must_use]
    pub const fn day(&self) -> &DaySession {
        &self.day
    }

    pub(crate) fn day_mut(&mut self) -> &mut DaySession {
        &mut self.day
    }

    #[inline]
    #[must_use]
    pub fn answer_heights(&self) -> &[i32] {
        &self.answer_heights
    }

    /// The answer, only once the session is over
    #[must_use]
    pub fn revealed_answer(&self) -> Option<&Sequence> {
        self.day.done.then_some(&self.answer)
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        if self.day.done {
            if self.day.won {
                SessionState::Won
            } else {
                SessionState::Lost
            }
        } else if self.day.awaiting_reveal {
            SessionState::AwaitingReveal
        } else {
            SessionState::Editing
        }
    }

    fn ensure_editing(&self) -> Result<(), SessionError> {
        match self.state() {
            SessionState::Editing => Ok(()),
            SessionState::AwaitingReveal => Err(SessionError::RevealPending),
            SessionState::Won | SessionState::Lost => Err(SessionError::SessionTerminal),
        }
    }

    /// Append a symbol to the in-progress guess
    ///
    /// # Errors
    /// `BufferFull` at length L, `RevealPending`, or `SessionTerminal`.
    pub fn append(&mut self, symbol: Symbol) -> Result<Transition, SessionError> {
        self.ensure_editing()?;
        if self.day.buffer.len() >= self.grammar.seq_len() {
            return Err(SessionError::BufferFull);
        }
        self.day.buffer.push(symbol);
        Ok(Transition::Edited)
    }

    /// Remove the last symbol of the in-progress guess
    ///
    /// # Errors
    /// `BufferEmpty`, `RevealPending`, or `SessionTerminal`.
    pub fn backspace(&mut self) -> Result<Transition, SessionError> {
        self.ensure_editing()?;
        if self.day.buffer.pop().is_none() {
            return Err(SessionError::BufferEmpty);
        }
        Ok(Transition::Edited)
    }

    /// Submit the in-progress buffer
    ///
    /// # Errors
    /// Grammar errors (including a partial row), `RevealPending`, or
    /// `SessionTerminal`. A rejected submit creates no round.
    pub fn submit(&mut self) -> Result<Transition, SessionError> {
        self.ensure_editing()?;
        self.grammar.check(&self.day.buffer)?;
        let guess = std::mem::take(&mut self.day.buffer);
        Ok(self.commit_round(guess))
    }

    /// Submit a whole guess given as text, replacing the buffer
    ///
    /// # Errors
    /// Same as [`GuessSession::submit`], plus `InvalidAlphabet`.
    pub fn submit_text(&mut self, text: &str) -> Result<Transition, SessionError> {
        self.ensure_editing()?;
        let guess = self.grammar.validate(text)?;
        self.day.buffer.clear();
        Ok(self.commit_round(guess))
    }

    fn commit_round(&mut self, guess: Sequence) -> Transition {
        let round = Round::new(guess);
        let matches = match_count(&round.heights, &self.answer_heights);
        let solved = round.guess == self.answer;
        self.day.rounds.push(round);
        self.day.last_match_count = Some(matches);

        let outcome = if solved {
            self.day.done = true;
            self.day.won = true;
            SubmitOutcome::Won
        } else if self.day.tries_used() >= MAX_TRIES {
            self.day.done = true;
            self.day.won = false;
            SubmitOutcome::Lost
        } else {
            self.day.awaiting_reveal = true;
            SubmitOutcome::AwaitingReveal
        };

        Transition::Submitted {
            match_count: matches,
            outcome,
        }
    }

    /// Reveal one hint cell of the most recent round
    ///
    /// # Errors
    /// `NoRevealPending` outside AwaitingReveal, `SessionTerminal` after the
    /// game ends, `RevealOutOfRange` for any cell not in the latest round,
    /// `AlreadyRevealed` for a cell that already shows its class.
    pub fn reveal(&mut self, round: usize, position: usize) -> Result<Transition, SessionError> {
        match self.state() {
            SessionState::AwaitingReveal => {}
            SessionState::Editing => return Err(SessionError::NoRevealPending),
            SessionState::Won | SessionState::Lost => return Err(SessionError::SessionTerminal),
        }

        let latest = self.day.tries_used().saturating_sub(1);
        if round != latest || position >= self.grammar.seq_len() {
            return Err(SessionError::RevealOutOfRange { round, position });
        }

        let answer_heights = &self.answer_heights;
        let target = &mut self.day.rounds[round];
        if target.revealed[position].is_some() {
            return Err(SessionError::AlreadyRevealed { round, position });
        }

        let feedback = Feedback::at(&target.heights, answer_heights, position);
        target.revealed[position] = Some(feedback);
        self.day.awaiting_reveal = false;
        self.day.buffer.clear();

        Ok(Transition::Revealed {
            round,
            position,
            feedback,
        })
    }

    /// Flip between symbol and height display; allowed in every state
    pub fn toggle_view(&mut self) -> Transition {
        self.day.show_heights = !self.day.show_heights;
        Transition::ViewToggled
    }

    /// Full feedback for a submitted round
    #[must_use]
    pub fn feedback_for(&self, round: &Round) -> Vec<Feedback> {
        Feedback::classify(&round.heights, &self.answer_heights)
    }

    /// Match count per submitted round
    #[must_use]
    pub fn match_counts(&self) -> Vec<usize> {
        self.day
            .rounds
            .iter()
            .map(|r| match_count(&r.heights, &self.answer_heights))
            .collect()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            date: self.day.date,
            state: self.state(),
            rounds: self.day.rounds.clone(),
            buffer: self.day.buffer.to_string(),
            tries_used: self.day.tries_used(),
            max_tries: MAX_TRIES,
            last_match_count: self.day.last_match_count,
            show_heights: self.day.show_heights,
            answer: self.revealed_answer().cloned(),
        }
    }

    #[must_use]
    pub fn share_summary(&self) -> ShareSummary {
        ShareSummary {
            date: self.day.date,
            won: self.day.won,
            tries_used: self.day.tries_used(),
            max_tries: MAX_TRIES,
            match_counts: self.match_counts(),
            grid: self
                .day
                .rounds
                .iter()
                .map(|r| self.feedback_for(r))
                .collect(),
        }
    }
}
