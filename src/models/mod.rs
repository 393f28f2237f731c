//! Data models shared by the log store, index and search.
//!
//! - [`LogEntry`] - an immutable `(timestamp, command)` pair from a log segment
//! - [`IndexRow`] - the indexed copy of a log entry, keyed by `rowid`
//! - [`SearchCursor`] - per-session position into the match sequence
//! - [`SearchOutcome`] - the single result of a stepwise search

pub mod history;
pub mod search;

pub use history::{IndexRow, LogEntry};
pub use search::{Direction, NOT_FOUND, Position, SearchCursor, SearchOutcome};
