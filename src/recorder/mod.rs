//! Recording executed commands.
//!
//! Each recorded command is written twice: appended to the current log
//! segment, then inserted into the index. The two writes are deliberately
//! not transactional. If the index cannot be opened or the insert fails,
//! the log still holds the entry and `scribe reset-index` restores
//! consistency.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::index_storage::IndexStore;
use crate::log_store::LogStore;
use crate::models::LogEntry;

/// Invocation name of this tool; commands starting with it are not recorded
pub const TOOL_NAME: &str = "scribe";

const RESYNC_HINT: &str =
    "Command was written to the log but not indexed; run `scribe reset-index` to resync";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded { rowid: i64 },
    /// The command invokes this tool
    Skipped,
}

/// Whether the first whitespace-delimited token of `command` is this tool
pub fn is_self_invocation(command: &str) -> bool {
    command.split_whitespace().next() == Some(TOOL_NAME)
}

enum IndexTarget<'a> {
    Open(&'a IndexStore),
    /// Opened only after the log append, so a broken index cannot block it
    Path(PathBuf),
}

pub struct Recorder<'a> {
    log: &'a LogStore,
    index: IndexTarget<'a>,
}

impl<'a> Recorder<'a> {
    pub fn new(log: &'a LogStore, index: &'a IndexStore) -> Self {
        Self { log, index: IndexTarget::Open(index) }
    }

    /// Recorder that opens the index at `path` once the entry is in the log
    pub fn with_index_path(log: &'a LogStore, path: impl Into<PathBuf>) -> Self {
        Self { log, index: IndexTarget::Path(path.into()) }
    }

    /// Record `command` at `timestamp` (seconds since the epoch)
    pub fn record(&self, command: &str, timestamp: i64) -> Result<RecordOutcome> {
        if is_self_invocation(command) {
            debug!("skipping own invocation");
            return Ok(RecordOutcome::Skipped);
        }

        let entry = LogEntry::new(timestamp, command);
        self.log.append(&entry)?;

        let rowid = match &self.index {
            IndexTarget::Open(index) => index.insert(&entry),
            IndexTarget::Path(path) => IndexStore::open(path).and_then(|index| index.insert(&entry)),
        }
        .context(RESYNC_HINT)?;

        Ok(RecordOutcome::Recorded { rowid })
    }
}
