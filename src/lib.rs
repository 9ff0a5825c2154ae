//! Brackle
//!
//! A daily puzzle: find the hidden sequence of `(`, `)` and `*` whose
//! running height never drops below zero, never exceeds `N`, and returns to
//! zero at the end. After each miss one cell of that guess may be revealed,
//! telling how far its height is from the answer's at that position.
//!
//! # Quick Start
//!
//! ```rust
//! use brackle::core::{Feedback, Grammar};
//! use brackle::universe::{DailySelector, Universe};
//!
//! let universe = Universe::new(Grammar::default());
//! let answer = DailySelector::new(&universe).answer_for_str("2024-01-01").unwrap();
//! assert_eq!(answer.to_string(), "*(()(*))");
//!
//! let guess = universe.grammar().validate("(*()*)**").unwrap();
//! let hints = Feedback::classify(&guess.height_profile(), &answer.height_profile());
//! assert_eq!(hints[2], Feedback::Hit);
//! ```

// Core domain types
pub mod core;

// Answer universe and daily selection
pub mod universe;

// Session state machine, stats and persistence
pub mod game;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;

pub mod config;
pub mod telemetry;
