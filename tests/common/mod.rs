//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use scribe::parsers::render_v1;
use scribe::{IndexStore, LogEntry, LogStore, StorageLayout};
use tempfile::TempDir;

/// Builder for temporary scribe storage roots
pub struct ScribeDirBuilder {
    temp_dir: TempDir,
    layout: StorageLayout,
}

impl ScribeDirBuilder {
    /// Create a root with empty `data` and `history` areas
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let layout = StorageLayout::new(temp_dir.path().join(".scribe"));
        layout.ensure().expect("Failed to create storage layout");
        Self { temp_dir, layout }
    }

    /// Write a raw segment file into the history area
    pub fn with_segment(self, name: &str, content: &str) -> Self {
        fs::write(self.layout.history_dir().join(name), content)
            .expect("Failed to write segment");
        self
    }

    /// Write a version-1 segment holding `entries`
    pub fn with_v1_segment(self, name: &str, entries: &[LogEntry]) -> Self {
        let content = render_v1(entries);
        self.with_segment(name, &content)
    }

    /// Write the current segment (`LATEST`) as version 1
    pub fn with_latest(self, entries: &[LogEntry]) -> Self {
        self.with_v1_segment(scribe::utils::LATEST_SEGMENT, entries)
    }

    /// Create the index database with its schema
    pub fn with_index(self) -> Self {
        open_index(&self.layout).provision().expect("Failed to provision index");
        self
    }

    pub fn build(self) -> ScribeDir {
        ScribeDir { _temp_dir: self.temp_dir, layout: self.layout }
    }
}

impl Default for ScribeDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A built storage root; removed when dropped
pub struct ScribeDir {
    _temp_dir: TempDir,
    pub layout: StorageLayout,
}

impl ScribeDir {
    pub fn root(&self) -> &Path {
        self.layout.root()
    }

    pub fn segment_path(&self, name: &str) -> PathBuf {
        self.layout.history_dir().join(name)
    }

    pub fn log(&self) -> LogStore {
        LogStore::new(&self.layout)
    }

    pub fn index(&self) -> IndexStore {
        open_index(&self.layout)
    }
}

fn open_index(layout: &StorageLayout) -> IndexStore {
    IndexStore::open(&layout.index_path()).expect("Failed to open index")
}

/// The three-command history used by the documented scenarios
pub fn scenario_entries() -> Vec<LogEntry> {
    vec![
        LogEntry::new(1000, "ls -la"),
        LogEntry::new(1010, "git status"),
        LogEntry::new(1020, "git commit -m fix"),
    ]
}

/// Commands and timestamps of all index rows, in rowid order
pub fn index_pairs(index: &IndexStore) -> Vec<(String, String)> {
    index
        .rows()
        .expect("Failed to read index rows")
        .into_iter()
        .map(|row| (row.timestamp, row.command))
        .collect()
}
