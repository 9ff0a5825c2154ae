//! Terminal output formatting
//!
//! Colored printing for the line-based commands and the plain-text
//! formatters shared with the TUI.

pub mod display;
pub mod formatters;

pub use display::{
    print_board, print_calendar_report, print_check_report, print_outcome, print_stats,
};
pub use formatters::{countdown, emoji_grid, match_pill, share_text};
