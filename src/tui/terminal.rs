use anyhow::{Context, Result};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

/// Keeps the controlling terminal in raw mode for the guard's lifetime
pub struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    /// Switch the terminal to raw mode: unbuffered, no echo, no signals
    pub fn enable() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw terminal mode")?;
        Ok(Self { active: true })
    }

    /// Restore the terminal, reporting failure
    pub fn restore(mut self) -> Result<()> {
        self.active = false;
        disable_raw_mode().context("Failed to restore terminal mode")
    }
}

// Restore on every exit path, including panics and early returns
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.active {
            let _ = disable_raw_mode();
        }
    }
}
