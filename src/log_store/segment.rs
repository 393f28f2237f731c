use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::models::LogEntry;
use crate::parsers::segment::parse_header;
use crate::parsers::{SegmentFormat, SegmentHeader, encode_entry, parse_segment, parse_v1, render_v1};

const TEMP_SUFFIX: &str = "tmp";

/// Read and parse a segment of any known format
pub fn read_segment(path: &Path) -> Result<(SegmentFormat, Vec<LogEntry>)> {
    let content =
        fs::read(path).with_context(|| format!("Failed to read log segment: {}", path.display()))?;
    parse_segment(&content).with_context(|| format!("Invalid log segment: {}", path.display()))
}

/// Read a segment that must already be in the current format
pub fn read_current_segment(path: &Path) -> Result<Vec<LogEntry>> {
    let content =
        fs::read(path).with_context(|| format!("Failed to read log segment: {}", path.display()))?;
    parse_v1(&content).with_context(|| {
        format!(
            "Log segment {} is not in the current format (run `scribe migrate-history`)",
            path.display()
        )
    })
}

/// Path of the temporary file used while rewriting `path`
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(TEMP_SUFFIX);
    path.with_file_name(name)
}

/// Replace `path` with a version-1 rendering of `entries`.
///
/// Writes a sibling temp file, syncs it, then renames it over the original so
/// a crash leaves either the old or the new segment, never a mix.
pub fn write_segment_atomic(path: &Path, entries: &[LogEntry]) -> Result<()> {
    let temp = temp_path(path);
    let content = render_v1(entries);

    let mut file = File::create(&temp)
        .with_context(|| format!("Failed to create temp segment: {}", temp.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write temp segment: {}", temp.display()))?;
    file.sync_all().with_context(|| format!("Failed to sync temp segment: {}", temp.display()))?;
    drop(file);

    fs::rename(&temp, path).with_context(|| {
        format!("Failed to move {} over {}", temp.display(), path.display())
    })?;
    Ok(())
}

/// Append one entry to the segment at `path`, creating it with a header
/// when it does not exist or is empty.
///
/// The line (and header, for a new file) goes out in a single write.
pub fn append_entry(path: &Path, entry: &LogEntry) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log segment: {}", path.display()))?;

    let is_new = file
        .metadata()
        .with_context(|| format!("Failed to stat log segment: {}", path.display()))?
        .len()
        == 0;

    let mut buf = String::new();
    if is_new {
        debug!(path = %path.display(), "creating log segment");
        buf.push_str(&SegmentHeader::current().render());
    } else {
        ensure_current_header(path)?;
    }
    buf.push_str(&encode_entry(entry));

    file.write_all(buf.as_bytes())
        .with_context(|| format!("Failed to append to log segment: {}", path.display()))?;
    Ok(())
}

fn ensure_current_header(path: &Path) -> Result<()> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open log segment: {}", path.display()))?;
    let mut first = Vec::new();
    BufReader::new(file)
        .read_until(b'\n', &mut first)
        .with_context(|| format!("Failed to read log segment header: {}", path.display()))?;

    let is_current = std::str::from_utf8(&first)
        .is_ok_and(|line| parse_header(line.trim_end_matches(['\r', '\n'])).is_ok());
    if !is_current {
        bail!(
            "Log segment {} is not in the current format; run `scribe migrate-history` before recording",
            path.display()
        );
    }
    Ok(())
}
