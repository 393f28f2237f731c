use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const DATA_DIR: &str = "data";
const HISTORY_DIR: &str = "history";
const INDEX_FILENAME: &str = "index.db";
const DEBUG_LOG_FILENAME: &str = "debug.log";

/// File name of the actively appended segment
pub const LATEST_SEGMENT: &str = "LATEST";

/// Storage directory structure, built once per invocation and handed to every
/// component that touches disk.
///
/// ```text
/// <root>/
///   data/index.db      index store (derived, rebuildable)
///   data/debug.log     debug log sink
///   history/LATEST     current log segment
///   history/log.*      historical log segments
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    root: PathBuf,
}

impl StorageLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    pub fn history_dir(&self) -> PathBuf {
        self.root.join(HISTORY_DIR)
    }

    pub fn index_path(&self) -> PathBuf {
        self.data_dir().join(INDEX_FILENAME)
    }

    pub fn debug_log_path(&self) -> PathBuf {
        self.data_dir().join(DEBUG_LOG_FILENAME)
    }

    pub fn latest_segment_path(&self) -> PathBuf {
        self.history_dir().join(LATEST_SEGMENT)
    }

    /// Create both storage areas if missing.
    ///
    /// Returns whether the root directory already existed.
    pub fn ensure(&self) -> Result<bool> {
        let already_exists = self.root.exists();

        for dir in [self.data_dir(), self.history_dir()] {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create storage area: {}", dir.display()))?;
        }

        Ok(already_exists)
    }
}
