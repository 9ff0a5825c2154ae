//! Game controller
//!
//! Owns today's [`GuessSession`], the [`StatsLedger`] and the [`Store`]. Every
//! accepted transition is persisted from the in-memory state before the call
//! returns, and the stats commit runs exactly once per finished day, guarded
//! by the day record's `recorded` flag.

use super::display::{DisplayRow, display_rows};
use super::record::{day_key, decode_day, decode_stats, encode_day, encode_stats, stats_key};
use super::session::{
    DaySession, GuessSession, SessionError, SessionSnapshot, ShareSummary, Transition,
};
use super::stats::{StatsLedger, StatsSnapshot};
use super::store::Store;
use crate::core::{Sequence, Symbol};
use crate::universe::{DailySelector, Universe};
use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};

/// How a [`Game`] was opened
#[derive(Debug, Clone, Default)]
pub struct GameOptions {
    /// Play against this answer instead of the daily one; stats are never
    /// touched and nothing is persisted
    pub practice_answer: Option<Sequence>,
}

/// Single controller for one player's game
pub struct Game<'a> {
    universe: &'a Universe,
    store: Box<dyn Store>,
    session: GuessSession,
    stats: StatsLedger,
    practice: bool,
    storage_ok: bool,
}

impl<'a> Game<'a> {
    /// Open the game for `date`, restoring today's record and the ledger
    #[instrument(skip(universe, store, options))]
    pub fn open(
        universe: &'a Universe,
        store: Box<dyn Store>,
        date: NaiveDate,
        options: GameOptions,
    ) -> Self {
        let grammar = universe.grammar();
        let practice = options.practice_answer.is_some();

        let mut storage_ok = true;
        let mut read = |key: &str| match store.load(key) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "storage read failed, continuing in memory");
                storage_ok = false;
                None
            }
        };

        let stats = if practice {
            StatsLedger::default()
        } else {
            decode_stats(read(&stats_key()).as_deref())
        };

        let (answer, day) = match options.practice_answer {
            Some(answer) => (answer, DaySession::new(date)),
            None => {
                let answer = DailySelector::new(universe).answer_for(date).clone();
                let day = decode_day(read(&day_key(date)).as_deref(), date, grammar);
                (answer, day)
            }
        };

        info!(%date, practice, rounds = day.tries_used(), "game opened");

        let mut game = Self {
            universe,
            store,
            session: GuessSession::new(grammar, answer, day),
            stats,
            practice,
            storage_ok,
        };
        // A finished day whose commit was interrupted is recorded now
        game.commit_stats_if_needed();
        game
    }

    /// Switch to `today` if the session belongs to an earlier date
    ///
    /// Returns `true` when a fresh session was started.
    #[instrument(skip(self))]
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if self.practice || self.session.day().date == today {
            return false;
        }
        info!(from = %self.session.day().date, to = %today, "day changed");

        let grammar = self.universe.grammar();
        let answer = DailySelector::new(self.universe).answer_for(today).clone();
        let raw = self.load_or_warn(&day_key(today));
        let day = decode_day(raw.as_deref(), today, grammar);
        self.session = GuessSession::new(grammar, answer, day);
        self.commit_stats_if_needed();
        true
    }

    #[must_use]
    pub const fn session(&self) -> &GuessSession {
        &self.session
    }

    #[must_use]
    pub const fn stats(&self) -> &StatsLedger {
        &self.stats
    }

    #[must_use]
    pub const fn is_practice(&self) -> bool {
        self.practice
    }

    /// `false` once any storage operation failed; play continues in memory
    #[must_use]
    pub const fn storage_ok(&self) -> bool {
        self.storage_ok
    }

    /// Append a symbol to the active row
    ///
    /// # Errors
    /// See [`GuessSession::append`]; rejected actions change nothing.
    #[instrument(skip(self))]
    pub fn append_symbol(&mut self, symbol: Symbol) -> Result<Transition, SessionError> {
        let t = self.session.append(symbol)?;
        self.after(t);
        Ok(t)
    }

    /// Remove the last symbol of the active row
    ///
    /// # Errors
    /// See [`GuessSession::backspace`].
    #[instrument(skip(self))]
    pub fn backspace(&mut self) -> Result<Transition, SessionError> {
        let t = self.session.backspace()?;
        self.after(t);
        Ok(t)
    }

    /// Submit the active row
    ///
    /// # Errors
    /// See [`GuessSession::submit`].
    #[instrument(skip(self))]
    pub fn submit(&mut self) -> Result<Transition, SessionError> {
        let t = self.session.submit()?;
        self.after(t);
        Ok(t)
    }

    /// Submit a complete guess given as text
    ///
    /// # Errors
    /// See [`GuessSession::submit_text`].
    #[instrument(skip(self))]
    pub fn submit_text(&mut self, guess: &str) -> Result<Transition, SessionError> {
        let t = self.session.submit_text(guess)?;
        self.after(t);
        Ok(t)
    }

    /// Reveal one hint cell of the latest round
    ///
    /// # Errors
    /// See [`GuessSession::reveal`].
    #[instrument(skip(self))]
    pub fn reveal_position(
        &mut self,
        round: usize,
        position: usize,
    ) -> Result<Transition, SessionError> {
        let t = self.session.reveal(round, position)?;
        self.after(t);
        Ok(t)
    }

    /// Flip between symbol and height display
    pub fn toggle_view(&mut self) -> Transition {
        let t = self.session.toggle_view();
        self.after(t);
        t
    }

    fn after(&mut self, transition: Transition) {
        debug!(?transition, "transition accepted");
        self.persist_day();
        self.commit_stats_if_needed();
    }

    fn commit_stats_if_needed(&mut self) {
        let day = self.session.day();
        if self.practice || !day.done || day.recorded {
            return;
        }

        let (date, won, tries) = (day.date, day.won, day.tries_used());
        let changed = self.stats.record_outcome(date, won, won.then_some(tries));
        info!(%date, won, tries, changed, "day outcome committed");

        if changed {
            self.persist_stats();
        }
        self.session.day_mut().recorded = true;
        self.persist_day();
    }

    fn load_or_warn(&mut self, key: &str) -> Option<String> {
        match self.store.load(key) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "storage read failed, continuing in memory");
                self.storage_ok = false;
                None
            }
        }
    }

    fn save_or_warn(&mut self, key: &str, encoded: serde_json::Result<String>) {
        let result = encoded
            .map_err(Into::into)
            .and_then(|raw| self.store.save(key, &raw));
        if let Err(e) = result {
            warn!(key, error = %e, "storage write failed, continuing in memory");
            self.storage_ok = false;
        }
    }

    fn persist_day(&mut self) {
        if self.practice {
            return;
        }
        let day = self.session.day();
        let (key, encoded) = (day_key(day.date), encode_day(day));
        self.save_or_warn(&key, encoded);
    }

    fn persist_stats(&mut self) {
        let encoded = encode_stats(&self.stats);
        self.save_or_warn(&stats_key(), encoded);
    }

    /// Rows for the board, always `MAX_TRIES` of them
    #[must_use]
    pub fn current_display_rows(&self) -> Vec<DisplayRow> {
        display_rows(&self.session)
    }

    #[must_use]
    pub fn session_snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    #[must_use]
    pub fn stats_snapshot(&self) -> StatsSnapshot {
        let day = self.session.day();
        let today = day.done.then_some((day.won, day.tries_used()));
        self.stats.snapshot(today)
    }

    #[must_use]
    pub fn share_summary(&self) -> ShareSummary {
        self.session.share_summary()
    }
}
