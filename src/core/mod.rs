//! Core domain types for Brackle
//!
//! Symbols, sequences and their height profiles, the sequence grammar, and
//! per-position feedback. Nothing here does I/O.

mod feedback;
mod grammar;
mod sequence;

pub use feedback::{Feedback, match_count};
pub use grammar::{Grammar, GrammarError};
pub use sequence::{HeightProfile, Sequence, Symbol, height_profile};
