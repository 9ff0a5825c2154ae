//! Board rows for rendering
//!
//! Pure functions of the session; nothing here mutates state.

use super::MAX_TRIES;
use super::session::{GuessSession, Round, SessionState};
use crate::core::{Feedback, Grammar, Sequence};

/// Role of a board row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// A submitted guess
    Submitted,
    /// The row currently being typed
    Active,
    /// Not reached yet; dimmed while the game is running
    Future,
    /// Unused row of a finished game
    Empty,
}

/// One board cell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    /// Symbol, height, `-`, or empty
    pub text: String,
    pub feedback: Option<Feedback>,
    pub cursor: bool,
    /// Can be picked as this round's hint
    pub clickable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub kind: RowKind,
    pub cells: Vec<Cell>,
}

/// Running heights of a partially typed row
///
/// Every typed position shows its height until the prefix first breaks the
/// grammar; from there on it shows `-`. The cursor position (the next empty
/// cell) repeats the current height. Remaining cells are empty.
#[must_use]
pub fn active_row_heights(grammar: Grammar, buffer: &Sequence) -> Vec<String> {
    let len = grammar.seq_len();
    let mut out = vec![String::new(); len];
    let mut height = 0;
    let mut broken = false;

    for (i, symbol) in buffer.symbols().iter().take(len).enumerate() {
        if !broken {
            height += symbol.delta();
            broken = !grammar.height_allowed(i, height);
        }
        out[i] = if broken { "-".to_string() } else { height.to_string() };
    }

    if let Some(cursor) = out.get_mut(buffer.len()) {
        *cursor = if broken { "-".to_string() } else { height.to_string() };
    }
    out
}

fn submitted_row(session: &GuessSession, round: &Round, latest: bool) -> DisplayRow {
    let day = session.day();
    let state = session.state();
    let full = state.is_terminal().then(|| session.feedback_for(round));

    let cells = (0..session.grammar().seq_len())
        .map(|i| {
            let text = if day.show_heights {
                round.heights.get(i).map(ToString::to_string)
            } else {
                round.guess.symbols().get(i).map(|s| s.as_char().to_string())
            };
            let revealed = round.revealed.get(i).copied().flatten();
            Cell {
                text: text.unwrap_or_default(),
                feedback: full.as_ref().and_then(|f| f.get(i).copied()).or(revealed),
                cursor: false,
                clickable: latest && state == SessionState::AwaitingReveal && revealed.is_none(),
            }
        })
        .collect();

    DisplayRow {
        kind: RowKind::Submitted,
        cells,
    }
}

fn active_row(session: &GuessSession) -> DisplayRow {
    let day = session.day();
    let len = session.grammar().seq_len();
    let texts = if day.show_heights {
        active_row_heights(session.grammar(), &day.buffer)
    } else {
        let mut texts: Vec<String> = day
            .buffer
            .symbols()
            .iter()
            .map(|s| s.as_char().to_string())
            .collect();
        texts.resize(len, String::new());
        texts
    };

    let cells = texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| Cell {
            text,
            cursor: i == day.buffer.len(),
            ..Cell::default()
        })
        .collect();

    DisplayRow {
        kind: RowKind::Active,
        cells,
    }
}

fn blank_row(kind: RowKind, len: usize) -> DisplayRow {
    DisplayRow {
        kind,
        cells: vec![Cell::default(); len],
    }
}

/// All `MAX_TRIES` board rows for the current state
#[must_use]
pub fn display_rows(session: &GuessSession) -> Vec<DisplayRow> {
    let day = session.day();
    let state = session.state();
    let len = session.grammar().seq_len();
    let submitted = day.tries_used();

    (0..MAX_TRIES)
        .map(|r| {
            if let Some(round) = day.rounds.get(r) {
                submitted_row(session, round, r + 1 == submitted)
            } else if r == submitted && state == SessionState::Editing {
                active_row(session)
            } else if state.is_terminal() {
                blank_row(RowKind::Empty, len)
            } else {
                blank_row(RowKind::Future, len)
            }
        })
        .collect()
}
