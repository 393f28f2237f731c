//! Substring search over recorded history.
//!
//! Two modes share one matching rule (case-sensitive containment, ordered by
//! `rowid`):
//!
//! - **batch**: [`SearchEngine::list_recent`], the most recent matches with no
//!   cursor state
//! - **stepwise**: [`Searcher::step`], one match at a time relative to a
//!   [`SearchCursor`](crate::models::SearchCursor), used by interactive mode

pub mod engine;

pub use engine::{BATCH_LIMIT, SearchEngine, Searcher};
