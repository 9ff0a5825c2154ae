//! Logging setup
//!
//! Filter directives come from `BRACKLE_LOG` (e.g. `BRACKLE_LOG=brackle=debug`)
//! and default to `warn`.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding filter directives
pub const LOG_ENV: &str = "BRACKLE_LOG";

/// Log file name used by the TUI, relative to the data directory
pub const LOG_FILE: &str = "brackle.log";

fn filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy()
}

/// Log to stderr; used by the line-based commands
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Log to `<dir>/brackle.log` so the alternate screen stays clean
///
/// # Errors
/// Returns the I/O error if the log file cannot be opened.
pub fn init_file(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
