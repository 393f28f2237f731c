//! Append-only log store, the source of truth for recorded history.
//!
//! History lives in line-oriented segment files under the `history` area:
//! one current segment (`LATEST`) that receives appends, plus any number of
//! historical, read-only segments. The index store is derived from these
//! files and can always be rebuilt from them.
//!
//! Concurrent appends from several shells are not arbitrated. Each entry is
//! a single small `O_APPEND` write, which keeps lines intact only as far as
//! the OS makes such writes atomic.

pub mod segment;

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::LogEntry;
use crate::parsers::SegmentHeader;
use crate::utils::StorageLayout;
pub use segment::{
    append_entry, read_current_segment, read_segment, temp_path, write_segment_atomic,
};

pub struct LogStore {
    history_dir: PathBuf,
    latest: PathBuf,
}

impl LogStore {
    pub fn new(layout: &StorageLayout) -> Self {
        Self { history_dir: layout.history_dir(), latest: layout.latest_segment_path() }
    }

    pub fn latest_path(&self) -> &Path {
        &self.latest
    }

    /// Append to the current segment
    pub fn append(&self, entry: &LogEntry) -> Result<()> {
        append_entry(&self.latest, entry)
    }

    /// Create the current segment holding only its header, unless it exists.
    ///
    /// Returns whether a new segment was created.
    pub fn ensure_latest(&self) -> Result<bool> {
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&self.latest) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to create log segment: {}", self.latest.display())
                });
            }
        };
        file.write_all(SegmentHeader::current().render().as_bytes())
            .with_context(|| format!("Failed to write segment header: {}", self.latest.display()))?;
        Ok(true)
    }

    /// Historical segments whose file name starts with `prefix`, in file name
    /// order. The current segment and leftover temp files are never included.
    /// A missing history area yields no segments.
    pub fn historical_segments(&self, prefix: &str) -> Result<Vec<PathBuf>> {
        if !self.history_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut segments = Vec::new();
        let dir = fs::read_dir(&self.history_dir).with_context(|| {
            format!("Failed to list history area: {}", self.history_dir.display())
        })?;

        for entry in dir {
            let entry = entry.context("Failed to read history area entry")?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.starts_with(prefix) || path == self.latest || name.ends_with(".tmp") {
                continue;
            }
            if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                segments.push(path);
            }
        }

        segments.sort();
        Ok(segments)
    }
}
