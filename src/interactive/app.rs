//! TUI application state and logic

use crate::core::Symbol;
use crate::game::{Game, MAX_TRIES, SessionError, SessionState, SubmitOutcome, Transition};
use crate::universe::today_utc;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Redraw interval so the countdown keeps ticking
const TICK: Duration = Duration::from_secs(1);

/// Application state
pub struct App<'a> {
    pub game: Game<'a>,
    /// Column highlighted for the next reveal
    pub selected: usize,
    pub messages: Vec<Message>,
    pub show_stats: bool,
    pub should_quit: bool,
    follows_clock: bool,
    last_tick: Instant,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

impl<'a> App<'a> {
    /// `follows_clock` lets the app switch to the new puzzle at UTC midnight
    #[must_use]
    pub fn new(game: Game<'a>, follows_clock: bool) -> Self {
        let mut app = Self {
            game,
            selected: 0,
            messages: Vec::new(),
            show_stats: false,
            should_quit: false,
            follows_clock,
            last_tick: Instant::now(),
        };
        app.greet();
        app
    }

    fn greet(&mut self) {
        match self.game.session().state() {
            SessionState::Editing => self.add_message(
                "Type ( ) * to build a guess, Enter to submit.",
                MessageStyle::Info,
            ),
            SessionState::AwaitingReveal => self.add_message(
                "Pick a cell of the last row to reveal its hint.",
                MessageStyle::Info,
            ),
            SessionState::Won | SessionState::Lost => {
                self.show_stats = true;
                self.add_message("Today's puzzle is done.", MessageStyle::Info);
            }
        }
        if self.game.is_practice() {
            self.add_message("Practice round: stats are not recorded.", MessageStyle::Info);
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    fn seq_len(&self) -> usize {
        self.game.session().grammar().seq_len()
    }

    /// Apply the result of a game action to the message log
    fn apply(&mut self, result: Result<Transition, SessionError>) {
        let len = self.seq_len();
        match result {
            Ok(Transition::Submitted {
                match_count,
                outcome,
            }) => match outcome {
                SubmitOutcome::Won => {
                    let tries = self.game.session().day().tries_used();
                    self.add_message(
                        &format!("🎉 Solved in {tries}/{MAX_TRIES}!"),
                        MessageStyle::Success,
                    );
                    self.show_stats = true;
                }
                SubmitOutcome::Lost => {
                    let answer = self
                        .game
                        .session()
                        .revealed_answer()
                        .map(ToString::to_string)
                        .unwrap_or_default();
                    self.add_message(&format!("Out of tries. It was {answer}."), MessageStyle::Error);
                    self.show_stats = true;
                }
                SubmitOutcome::AwaitingReveal => {
                    self.selected = 0;
                    self.add_message(
                        &format!("{match_count}/{len} exact. Pick a cell to reveal."),
                        MessageStyle::Info,
                    );
                }
            },
            Ok(Transition::Revealed {
                round,
                position,
                feedback,
            }) => self.add_message(
                &format!(
                    "Revealed row {}, col {}: {}.",
                    round + 1,
                    position + 1,
                    feedback.label()
                ),
                MessageStyle::Info,
            ),
            Ok(Transition::Edited | Transition::ViewToggled) => {}
            // Finished days ignore input silently
            Err(SessionError::SessionTerminal) => {}
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }

        if !self.game.storage_ok() {
            self.add_message("Progress could not be saved.", MessageStyle::Error);
        }
    }

    fn reveal(&mut self, position: usize) {
        let round = self.game.session().day().tries_used().saturating_sub(1);
        let result = self.game.reveal_position(round, position);
        self.apply(result);
    }

    /// Handle one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        let state = self.game.session().state();
        let len = self.seq_len();

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('b') => {
                self.game.toggle_view();
            }
            KeyCode::Char('s') => self.show_stats = !self.show_stats,
            KeyCode::Char(ch) if Symbol::from_char(ch).is_some() => {
                if let Some(symbol) = Symbol::from_char(ch) {
                    let result = self.game.append_symbol(symbol);
                    // A full row just ignores extra symbols
                    if !matches!(result, Err(SessionError::BufferFull)) {
                        self.apply(result);
                    }
                }
            }
            KeyCode::Char(d) if state == SessionState::AwaitingReveal => {
                if let Some(col) = d.to_digit(10).map(|n| n as usize)
                    && (1..=len).contains(&col)
                {
                    self.selected = col - 1;
                    self.reveal(col - 1);
                }
            }
            KeyCode::Left if state == SessionState::AwaitingReveal => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Right if state == SessionState::AwaitingReveal => {
                self.selected = (self.selected + 1).min(len - 1);
            }
            KeyCode::Backspace => {
                let result = self.game.backspace();
                if !matches!(result, Err(SessionError::BufferEmpty)) {
                    self.apply(result);
                }
            }
            KeyCode::Enter if state == SessionState::AwaitingReveal => self.reveal(self.selected),
            KeyCode::Enter => {
                let result = self.game.submit();
                self.apply(result);
            }
            _ => {}
        }
    }

    /// Run [`App::tick`] if a full interval passed since the last one
    pub fn tick_if_due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_tick) < TICK {
            return false;
        }
        self.last_tick = now;
        self.tick();
        true
    }

    /// Time left until the next tick is due
    fn until_tick(&self) -> Duration {
        TICK.saturating_sub(self.last_tick.elapsed())
    }

    /// Switch to a new day's puzzle after UTC midnight
    pub fn tick(&mut self) {
        if self.follows_clock && self.game.roll_over(today_utc()) {
            info!("switched to the new daily puzzle");
            self.messages.clear();
            self.show_stats = false;
            self.selected = 0;
            self.add_message("A new puzzle is available!", MessageStyle::Success);
            self.greet();
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if event::poll(app.until_tick())?
            && let Event::Key(key) = event::read()?
            // Only process key press events (fixes Windows double-input bug)
            && key.kind == KeyEventKind::Press
        {
            debug!(?key.code, "key");
            app.handle_key(key);
        }
        // Keys arriving faster than the interval must not hold back the clock
        app.tick_if_due(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
