//! Log segment format.
//!
//! Version 1 (current):
//!
//! ```text
//! version=1,encoding=base64
//! ---
//! <timestamp>:<base64(command)>
//! ```
//!
//! Version 0 carries no header. Each record starts with a 10-digit timestamp
//! followed by `:` and the raw command; any other line continues the
//! previous command.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::error::FormatError;
use crate::models::LogEntry;

pub const CURRENT_VERSION: u32 = 1;
pub const SEPARATOR: &str = "---";

const VERSION_KEY: &str = "version";
const ENCODING_KEY: &str = "encoding";
// Written by early recorders; read-only alias of `encoding`
const LEGACY_ENCODING_KEY: &str = "encoder";
const V0_TIMESTAMP_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Base64,
}

impl Encoding {
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Base64 => "base64",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentHeader {
    pub version: u32,
    pub encoding: Encoding,
}

impl SegmentHeader {
    pub fn current() -> Self {
        Self { version: CURRENT_VERSION, encoding: Encoding::Base64 }
    }

    /// The two header lines, separator included
    pub fn render(&self) -> String {
        format!(
            "{}={},{}={}\n{}\n",
            VERSION_KEY,
            self.version,
            ENCODING_KEY,
            self.encoding.name(),
            SEPARATOR
        )
    }
}

/// Which on-disk layout a segment uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentFormat {
    Version0,
    Version1,
}

/// Parse a `version=N,encoding=NAME` header line
pub fn parse_header(line: &str) -> Result<SegmentHeader, FormatError> {
    let mut version = None;
    let mut encoding = None;

    for field in line.trim_end().split(',') {
        let (key, value) =
            field.split_once('=').ok_or_else(|| FormatError::MalformedHeader(line.to_string()))?;
        match key.trim() {
            VERSION_KEY => version = Some(value.trim()),
            ENCODING_KEY | LEGACY_ENCODING_KEY => encoding = Some(value.trim()),
            _ => return Err(FormatError::MalformedHeader(line.to_string())),
        }
    }

    let version = version.ok_or_else(|| FormatError::MalformedHeader(line.to_string()))?;
    let version = match version.parse::<u32>() {
        Ok(v) if v == CURRENT_VERSION => v,
        _ => return Err(FormatError::UnsupportedVersion(version.to_string())),
    };

    let encoding = match encoding {
        Some("base64") => Encoding::Base64,
        Some(other) => return Err(FormatError::UnsupportedEncoding(other.to_string())),
        None => return Err(FormatError::MalformedHeader(line.to_string())),
    };

    Ok(SegmentHeader { version, encoding })
}

/// Lines of a segment, split on `\n` with an optional trailing `\r`
/// removed. Matches `str::lines` but works on raw bytes.
fn split_lines(content: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = content.strip_suffix(b"\n").unwrap_or(content);
    let count = if content.is_empty() { 0 } else { usize::MAX };
    body.split(|&b| b == b'\n').take(count).map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

fn header_text(line: &[u8]) -> Result<&str, FormatError> {
    std::str::from_utf8(line)
        .map_err(|_| FormatError::MalformedHeader(String::from_utf8_lossy(line).into_owned()))
}

/// Decide the segment layout from its first line.
///
/// A first line declaring `version=` must be a valid current header; anything
/// else (including an empty segment) is version 0.
pub fn sniff_format(content: impl AsRef<[u8]>) -> Result<SegmentFormat, FormatError> {
    match split_lines(content.as_ref()).next() {
        Some(first) if first.starts_with(VERSION_KEY.as_bytes()) => {
            parse_header(header_text(first)?)?;
            Ok(SegmentFormat::Version1)
        }
        _ => Ok(SegmentFormat::Version0),
    }
}

/// Parse a whole segment, dispatching on its sniffed format
pub fn parse_segment(
    content: impl AsRef<[u8]>,
) -> Result<(SegmentFormat, Vec<LogEntry>), FormatError> {
    let content = content.as_ref();
    let format = sniff_format(content)?;
    let entries = match format {
        SegmentFormat::Version0 => parse_v0(content)?,
        SegmentFormat::Version1 => parse_v1(content)?,
    };
    Ok((format, entries))
}

/// Parse a version-1 segment: header, separator, one encoded entry per line
pub fn parse_v1(content: impl AsRef<[u8]>) -> Result<Vec<LogEntry>, FormatError> {
    let mut lines = split_lines(content.as_ref());

    let header = lines.next().ok_or_else(|| FormatError::MalformedHeader(String::new()))?;
    parse_header(header_text(header)?)?;

    match lines.next() {
        Some(line) if line == SEPARATOR.as_bytes() => {}
        _ => return Err(FormatError::MissingSeparator),
    }

    // Header and separator occupy lines 1 and 2
    lines.enumerate().map(|(idx, line)| decode_line(line, idx + 3)).collect()
}

fn decode_line(line: &[u8], line_num: usize) -> Result<LogEntry, FormatError> {
    let colon = line.iter().position(|&b| b == b':').ok_or_else(|| {
        FormatError::MalformedLine {
            line: line_num,
            reason: "expected `<timestamp>:<command>`".to_string(),
        }
    })?;
    let (timestamp, encoded) = (&line[..colon], &line[colon + 1..]);

    let timestamp = String::from_utf8_lossy(timestamp);
    let timestamp = timestamp.parse::<i64>().map_err(|e| FormatError::MalformedLine {
        line: line_num,
        reason: format!("invalid timestamp {:?}: {}", timestamp, e),
    })?;

    let command = STANDARD
        .decode(encoded)
        .map_err(|e| FormatError::InvalidEncoding { line: line_num, reason: e.to_string() })?;

    Ok(LogEntry { timestamp, command })
}

/// Split a version-0 record start into its timestamp and command bytes.
/// Returns `None` for continuation lines.
fn v0_record_start(line: &[u8]) -> Option<(i64, &[u8])> {
    if line.len() <= V0_TIMESTAMP_DIGITS
        || !line[..V0_TIMESTAMP_DIGITS].iter().all(u8::is_ascii_digit)
        || line[V0_TIMESTAMP_DIGITS] != b':'
    {
        return None;
    }
    let timestamp = std::str::from_utf8(&line[..V0_TIMESTAMP_DIGITS]).ok()?.parse().ok()?;
    Some((timestamp, &line[V0_TIMESTAMP_DIGITS + 1..]))
}

/// Parse a version-0 segment: raw command bytes, possibly spanning several
/// lines
pub fn parse_v0(content: impl AsRef<[u8]>) -> Result<Vec<LogEntry>, FormatError> {
    let mut entries: Vec<LogEntry> = Vec::new();

    for (idx, line) in split_lines(content.as_ref()).enumerate() {
        match v0_record_start(line) {
            Some((timestamp, command)) => entries.push(LogEntry::new(timestamp, command)),
            None => {
                let current = entries
                    .last_mut()
                    .ok_or(FormatError::OrphanContinuation { line: idx + 1 })?;
                current.command.push(b'\n');
                current.command.extend_from_slice(line);
            }
        }
    }

    Ok(entries)
}

/// Encode one entry as a version-1 line, trailing newline included
pub fn encode_entry(entry: &LogEntry) -> String {
    format!("{}:{}\n", entry.timestamp, STANDARD.encode(&entry.command))
}

/// Render a complete version-1 segment
pub fn render_v1(entries: &[LogEntry]) -> String {
    let mut out = SegmentHeader::current().render();
    for entry in entries {
        out.push_str(&encode_entry(entry));
    }
    out
}
