//! Command implementations

pub mod calendar;
pub mod check;
pub mod simple;

pub use calendar::{CalendarReport, run_calendar};
pub use check::{CheckReport, check_guess};
pub use simple::run_simple;
