use std::borrow::Cow;

/// A single recorded command as it lives in a log segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Seconds since the Unix epoch
    pub timestamp: i64,
    /// Raw command bytes; segments are not required to hold UTF-8
    pub command: Vec<u8>,
}

impl LogEntry {
    pub fn new(timestamp: i64, command: impl Into<Vec<u8>>) -> Self {
        Self { timestamp, command: command.into() }
    }

    /// The command as text, with invalid UTF-8 replaced by U+FFFD
    pub fn command_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.command)
    }
}

/// A row of the `history` table. `rowid` follows insertion order and is the
/// only ordering key used by search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRow {
    pub rowid: i64,
    pub command: String,
    pub timestamp: String,
}

impl IndexRow {
    /// Format as a listing label: right-aligned rowid, two spaces, command
    pub fn label(&self) -> String {
        format!("{:>4}  {}", self.rowid, self.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_pads_rowid() {
        let row = IndexRow { rowid: 3, command: "git status".to_string(), timestamp: "1".into() };
        assert_eq!(row.label(), "   3  git status");
        assert_eq!(row.label().trim_start(), "3  git status");
    }

    #[test]
    fn test_command_text_is_lossy() {
        let entry = LogEntry::new(1, b"echo caf\xe9".to_vec());
        assert_eq!(entry.command_text(), "echo caf\u{fffd}");
        assert_eq!(LogEntry::new(1, "ls").command_text(), "ls");
    }

    #[test]
    fn test_label_wide_rowid() {
        let row = IndexRow { rowid: 123456, command: "ls".to_string(), timestamp: "1".into() };
        assert_eq!(row.label(), "123456  ls");
    }
}
