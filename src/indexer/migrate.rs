use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::{MIGRATION_SCAN_PREFIX, REBUILD_SCAN_PREFIX, SkippedSegment};
use crate::log_store::{LogStore, read_segment, write_segment_atomic};
use crate::parsers::SegmentFormat;

/// What [`upgrade_segment`] did to a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeOutcome {
    /// Already current; the file was not touched
    AlreadyCurrent,
    /// Rewritten from version 0, holding this many entries
    Upgraded(usize),
}

/// Bring one segment to the current format.
///
/// Version-1 segments are left byte-for-byte untouched. Version-0 segments
/// are parsed in full first, then replaced atomically, so a failure at any
/// point leaves the original file intact.
pub fn upgrade_segment(path: &Path) -> Result<UpgradeOutcome> {
    let (format, entries) = read_segment(path)?;

    match format {
        SegmentFormat::Version1 => Ok(UpgradeOutcome::AlreadyCurrent),
        SegmentFormat::Version0 => {
            write_segment_atomic(path, &entries)
                .with_context(|| format!("Failed to upgrade log segment: {}", path.display()))?;
            info!(path = %path.display(), entries = entries.len(), "upgraded log segment to v1");
            Ok(UpgradeOutcome::Upgraded(entries.len()))
        }
    }
}

/// Summary of a `migrate-history` run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Segments looked at, skipped ones included
    pub scanned: usize,
    pub upgraded: usize,
    pub skipped: Vec<SkippedSegment>,
}

/// Upgrade every historical segment (`log*`) and then the current segment.
///
/// Segments that the rebuild scan (`log.*`) would not pick up are still
/// upgraded, but reported in the debug log, since their entries will never
/// reach the index. A segment that fails to parse is left untouched and
/// reported, and the remaining segments are still upgraded.
pub fn migrate_history(store: &LogStore) -> Result<MigrationReport> {
    let mut report = MigrationReport::default();

    let mut segments = Vec::new();
    for path in store.historical_segments(MIGRATION_SCAN_PREFIX)? {
        if !file_name_starts_with(&path, REBUILD_SCAN_PREFIX) {
            warn!(
                path = %path.display(),
                "segment matches the migration scan but not the rebuild scan; it will not be indexed"
            );
        }
        segments.push(path);
    }
    let latest = store.latest_path();
    if latest.exists() {
        segments.push(latest.to_path_buf());
    }

    for path in segments {
        report.scanned += 1;
        match upgrade_segment(&path) {
            Ok(UpgradeOutcome::Upgraded(_)) => report.upgraded += 1,
            Ok(UpgradeOutcome::AlreadyCurrent) => {}
            Err(e) => report.skipped.push(SkippedSegment::new(path, &e)),
        }
    }

    Ok(report)
}

fn file_name_starts_with(path: &Path, prefix: &str) -> bool {
    path.file_name().and_then(|n| n.to_str()).is_some_and(|n| n.starts_with(prefix))
}
