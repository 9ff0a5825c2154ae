//! Daily game state
//!
//! - [`GuessSession`]: one day's guess/reveal state machine
//! - [`StatsLedger`]: cross-day statistics
//! - [`Store`]: persistence backends and the lenient record decoder
//! - [`Game`]: the controller that ties them together for a UI

mod controller;
mod display;
pub mod record;
mod session;
mod stats;
pub mod store;

pub use controller::{Game, GameOptions};
pub use display::{Cell, DisplayRow, RowKind, active_row_heights};
pub use session::{
    DaySession, GuessSession, Round, SessionError, SessionSnapshot, SessionState, ShareSummary,
    SubmitOutcome, Transition,
};
pub use stats::{DistRow, Distribution, StatsLedger, StatsSnapshot};
pub use store::{FileStore, MemoryStore, Store, StoreError};

/// Rounds allowed per day
pub const MAX_TRIES: usize = 6;

/// Version tag written into every persisted record
pub const RECORD_VERSION: u32 = 2;

/// Game identifier baked into day record keys
pub const GAME_ID: &str = "L8";
