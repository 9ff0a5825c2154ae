//! Runtime configuration: data directory and play date

use crate::game::{FileStore, MemoryStore, Store};
use crate::universe::{parse_day, today_utc};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "BRACKLE_DATA_DIR";

/// Resolved settings shared by every command
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    /// Day to play; `None` follows the UTC clock
    pub date: Option<NaiveDate>,
    /// Keep everything in memory
    pub no_save: bool,
}

impl Config {
    /// Build from command-line values
    ///
    /// # Errors
    /// Returns an error if `date` is not `YYYY-MM-DD`.
    pub fn new(data_dir: Option<PathBuf>, date: Option<&str>, no_save: bool) -> Result<Self> {
        let date = date
            .map(|d| parse_day(d).with_context(|| format!("invalid date '{d}', expected YYYY-MM-DD")))
            .transpose()?;
        Ok(Self {
            data_dir: resolve_data_dir(data_dir, std::env::var(DATA_DIR_ENV).ok()),
            date,
            no_save,
        })
    }

    /// Day being played
    #[must_use]
    pub fn play_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(today_utc)
    }

    /// Whether the date follows the clock (and may roll over mid-session)
    #[must_use]
    pub const fn follows_clock(&self) -> bool {
        self.date.is_none()
    }

    /// Directory for the TUI log file; `None` when nothing may be written
    #[must_use]
    pub fn log_dir(&self) -> Option<&Path> {
        (!self.no_save).then_some(self.data_dir.as_path())
    }

    /// Open the configured store
    ///
    /// Falls back to memory when the data directory is unusable.
    #[must_use]
    pub fn open_store(&self) -> Box<dyn Store> {
        if self.no_save {
            return Box::new(MemoryStore::new());
        }
        match FileStore::open(&self.data_dir) {
            Ok(store) => Box::new(store),
            Err(e) => {
                tracing::warn!(error = %e, "data directory unusable, progress will not be saved");
                Box::new(MemoryStore::new())
            }
        }
    }
}

/// Pick the data directory
///
/// Order: explicit flag, `BRACKLE_DATA_DIR`, the platform data directory
/// joined with `brackle`, then `./.brackle`.
#[must_use]
pub fn resolve_data_dir(flag: Option<PathBuf>, env: Option<String>) -> PathBuf {
    if let Some(dir) = flag {
        return dir;
    }
    if let Some(dir) = env.filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::data_dir().map_or_else(|| Path::new(".brackle").to_path_buf(), |d| d.join("brackle"))
}
