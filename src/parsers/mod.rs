//! Pure parsers for the log segment format.
//!
//! Each format version has its own parse function, selected by sniffing the
//! first line of the segment. Unlike the import paths of other history
//! tools, a malformed line is never skipped here: the log is the source of
//! truth, so a segment either parses completely or fails with a
//! [`FormatError`] that names the offending line.

pub mod error;
pub mod segment;

pub use error::FormatError;
pub use segment::{
    SegmentFormat, SegmentHeader, encode_entry, parse_segment, parse_v0, parse_v1, render_v1,
    sniff_format,
};
