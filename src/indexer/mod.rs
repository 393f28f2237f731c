//! Log maintenance: format upgrades and index rebuilds.
//!
//! The log is durable truth and the index is disposable, so both operations
//! flow one way: segments are rewritten only to move them to the current
//! format, and the index is only ever recreated from the segments.
//!
//! The two scans use different historical file name prefixes: migration
//! looks at every file starting with `log`, the rebuild only at `log.*`.
//! Files caught by the first scan but not the second are logged when
//! migrating instead of being silently folded into one rule.

use std::path::PathBuf;

use tracing::warn;

pub mod migrate;
pub mod rebuild;

pub use migrate::{MigrationReport, UpgradeOutcome, migrate_history, upgrade_segment};
pub use rebuild::{RebuildReport, rebuild_index};

/// File name prefix of historical segments picked up by `migrate-history`
pub const MIGRATION_SCAN_PREFIX: &str = "log";
/// File name prefix of historical segments replayed by `reset-index`
pub const REBUILD_SCAN_PREFIX: &str = "log.";

/// A segment left out of a maintenance run. A broken segment never stops the
/// remaining segments from being processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSegment {
    pub path: PathBuf,
    /// Full error chain
    pub reason: String,
}

impl SkippedSegment {
    pub(crate) fn new(path: PathBuf, err: &anyhow::Error) -> Self {
        let reason = format!("{:#}", err);
        warn!(path = %path.display(), %reason, "skipping segment");
        Self { path, reason }
    }
}
