use anyhow::Result;
use tracing::debug;

use crate::index_storage::IndexStore;
use crate::models::{IndexRow, Position, SearchCursor, SearchOutcome};

/// Maximum number of rows returned by a batch search
pub const BATCH_LIMIT: usize = 20;

/// Stepwise search, the only thing the interactive session needs from storage
pub trait Searcher {
    /// Find the single match closest to `cursor` in its direction.
    ///
    /// On a match the cursor moves to the matched rowid. An empty query or a
    /// miss leaves the cursor untouched.
    fn step(&mut self, query: &str, cursor: &mut SearchCursor) -> Result<SearchOutcome>;
}

/// Substring search over the index store
pub struct SearchEngine<'a> {
    index: &'a IndexStore,
}

impl<'a> SearchEngine<'a> {
    pub fn new(index: &'a IndexStore) -> Self {
        Self { index }
    }

    /// Up to [`BATCH_LIMIT`] most recent rows containing `query`, newest
    /// first. An empty query lists recent history.
    pub fn list_recent(&self, query: &str) -> Result<Vec<IndexRow>> {
        self.index.recent_matches(query, BATCH_LIMIT)
    }
}

impl Searcher for SearchEngine<'_> {
    fn step(&mut self, query: &str, cursor: &mut SearchCursor) -> Result<SearchOutcome> {
        if query.is_empty() {
            return Ok(SearchOutcome::Empty);
        }

        let found = self.index.closest_match(query, cursor.direction, cursor.position.as_bound())?;
        debug!(query, ?cursor, found = ?found.as_ref().map(|r| r.rowid), "stepwise search");

        Ok(match found {
            Some(row) => {
                cursor.position = Position::At(row.rowid);
                SearchOutcome::Found { rowid: row.rowid, command: row.command }
            }
            None => SearchOutcome::NotFound,
        })
    }
}
