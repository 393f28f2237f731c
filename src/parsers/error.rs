use thiserror::Error;

/// Errors in the on-disk segment format. Fatal for the segment being
/// processed, never for its neighbours.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("malformed segment header: {0:?}")]
    MalformedHeader(String),

    #[error("unsupported segment version {0:?}")]
    UnsupportedVersion(String),

    #[error("unsupported segment encoding {0:?}")]
    UnsupportedEncoding(String),

    #[error("missing `---` separator after the segment header")]
    MissingSeparator,

    #[error("malformed line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("line {line} does not hold a valid base64 command: {reason}")]
    InvalidEncoding { line: usize, reason: String },

    #[error("line {line} continues a command, but no command starts before it")]
    OrphanContinuation { line: usize },
}
