use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::migrate::upgrade_segment;
use super::{REBUILD_SCAN_PREFIX, SkippedSegment};
use crate::index_storage::IndexStore;
use crate::log_store::{LogStore, read_current_segment};
use crate::models::LogEntry;

/// Summary of an index rebuild
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RebuildReport {
    pub removed: usize,
    pub segments: usize,
    pub entries: usize,
    /// Segments that could not be upgraded or read; none of their entries
    /// were replayed
    pub skipped: Vec<SkippedSegment>,
}

/// Rebuild the index from scratch by replaying the log.
///
/// Deletes every row, then replays historical segments (`log.*`, file name
/// order) followed by the current segment, upgrading each one first if
/// needed. Rows are inserted through the same path the recorder uses, so the
/// result matches what recording would have produced. Zero segments, or a
/// missing current segment, is a valid empty history.
///
/// A segment that cannot be upgraded or parsed is skipped and reported;
/// index write failures abort the rebuild.
pub fn rebuild_index(store: &LogStore, index: &IndexStore) -> Result<RebuildReport> {
    index.provision()?;
    let mut report = RebuildReport { removed: index.clear()?, ..Default::default() };

    let mut segments = store.historical_segments(REBUILD_SCAN_PREFIX)?;
    let latest = store.latest_path().to_path_buf();
    if latest.exists() {
        segments.push(latest);
    } else {
        debug!(path = %latest.display(), "no current segment to replay");
    }

    for path in segments {
        let entries = match load_segment(&path) {
            Ok(entries) => entries,
            Err(e) => {
                report.skipped.push(SkippedSegment::new(path, &e));
                continue;
            }
        };

        for entry in &entries {
            index.insert(entry).with_context(|| {
                format!("Failed to replay {} into the index", path.display())
            })?;
        }

        report.segments += 1;
        report.entries += entries.len();
    }

    info!(
        removed = report.removed,
        segments = report.segments,
        entries = report.entries,
        skipped = report.skipped.len(),
        "rebuilt index from log"
    );
    Ok(report)
}

fn load_segment(path: &Path) -> Result<Vec<LogEntry>> {
    upgrade_segment(path)?;
    read_current_segment(path)
}
