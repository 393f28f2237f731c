use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable overriding the storage root
pub const SCRIBE_DIR_ENV: &str = "SCRIBE_DIR";

const DEFAULT_DIR_NAME: &str = ".scribe";

/// Resolve the storage root: `SCRIBE_DIR` if set, else `~/.scribe`
pub fn get_scribe_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(SCRIBE_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let home = dirs::home_dir()
        .or_else(|| env::var_os("HOME").map(PathBuf::from))
        .context("Unable to detect home directory, most likely $HOME is not set")?;
    Ok(home.join(DEFAULT_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    // Both cases share one test so they never race on the process environment
    #[test]
    fn test_get_scribe_dir_env_override_and_default() {
        let original = env::var_os(SCRIBE_DIR_ENV);

        // SAFETY: only this test touches SCRIBE_DIR, and it restores the value
        unsafe {
            env::set_var(SCRIBE_DIR_ENV, "/tmp/scribe-test-root");
        }
        assert_eq!(get_scribe_dir().unwrap(), PathBuf::from("/tmp/scribe-test-root"));

        unsafe {
            env::remove_var(SCRIBE_DIR_ENV);
        }
        if let Ok(dir) = get_scribe_dir() {
            assert!(dir.ends_with(".scribe"));
        }

        if let Some(value) = original {
            unsafe {
                env::set_var(SCRIBE_DIR_ENV, value);
            }
        }
    }
}
