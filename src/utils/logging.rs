use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use super::paths::StorageLayout;

/// Environment variable holding the debug log filter directive
pub const LOG_FILTER_ENV: &str = "SCRIBE_LOG";

const DEFAULT_FILTER: &str = "info";

/// Install the debug log sink at `data/debug.log`.
///
/// Stdout carries results for shell integration and the terminal carries the
/// interactive display, so logs only ever go to the file. Does nothing until
/// the data area exists.
pub fn init_logging(layout: &StorageLayout) -> Result<()> {
    if !layout.data_dir().is_dir() {
        return Ok(());
    }

    let path = layout.debug_log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open debug log: {}", path.display()))?;

    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A subscriber may already be installed (tests, embedding); keep it
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();

    Ok(())
}
