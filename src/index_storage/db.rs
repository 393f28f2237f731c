use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use crate::models::{Direction, IndexRow, LogEntry};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS history (
        command TEXT NOT NULL,
        timestamp TEXT NOT NULL
    );
"#;

// Case-sensitive substring containment; an empty needle matches every row.
// instr() is used instead of LIKE so `%` and `_` in a query stay literal.
const MATCHES: &str = "(?1 = '' OR instr(command, ?1) > 0)";

/// Relational index over the log: `history(rowid, command, timestamp)`.
///
/// Purely derivative. Every row can be reproduced by replaying the log
/// segments, so the whole table may be dropped and rebuilt at any time.
pub struct IndexStore {
    conn: Connection,
}

impl IndexStore {
    /// Open the index at `path`. The schema is expected to exist already
    /// (see [`IndexStore::provision`]).
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open index store: {}", path.display()))?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.provision()?;
        Ok(store)
    }

    /// Create the `history` table if it does not exist yet
    pub fn provision(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA).context("Failed to provision index schema")?;
        Ok(())
    }

    /// Insert one log entry, returning its rowid.
    ///
    /// The index holds text, so bytes that are not UTF-8 are stored as
    /// U+FFFD. The log keeps the original bytes.
    pub fn insert(&self, entry: &LogEntry) -> Result<i64> {
        let command = entry.command_text().into_owned();
        self.conn
            .execute(
                "INSERT INTO history (command, timestamp) VALUES (?1, ?2)",
                params![command, entry.timestamp.to_string()],
            )
            .map_err(schema_hint)?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Delete every row, returning how many were removed
    pub fn clear(&self) -> Result<usize> {
        let removed = self.conn.execute("DELETE FROM history", []).map_err(schema_hint)?;
        Ok(removed)
    }

    pub fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))
            .map_err(schema_hint)?;
        Ok(count)
    }

    /// All rows in rowid order
    pub fn rows(&self) -> Result<Vec<IndexRow>> {
        let mut stmt = self
            .conn
            .prepare("SELECT rowid, command, timestamp FROM history ORDER BY rowid")
            .map_err(schema_hint)?;

        let rows = stmt.query_map([], map_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Up to `limit` rows containing `query`, newest first
    pub fn recent_matches(&self, query: &str, limit: usize) -> Result<Vec<IndexRow>> {
        let sql = format!(
            "SELECT rowid, command, timestamp FROM history WHERE {} ORDER BY rowid DESC LIMIT ?2",
            MATCHES
        );
        let mut stmt = self.conn.prepare(&sql).map_err(schema_hint)?;

        let rows = stmt
            .query_map(params![query, limit as i64], map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// The matching row closest to `bound` in `direction`, bound included:
    /// `Older` picks the greatest rowid <= bound, `Newer` the smallest >= bound.
    pub fn closest_match(
        &self,
        query: &str,
        direction: Direction,
        bound: i64,
    ) -> Result<Option<IndexRow>> {
        let (comparison, order) = match direction {
            Direction::Older => ("<=", "DESC"),
            Direction::Newer => (">=", "ASC"),
        };
        let sql = format!(
            "SELECT rowid, command, timestamp FROM history \
             WHERE {} AND rowid {} ?2 ORDER BY rowid {} LIMIT 1",
            MATCHES, comparison, order
        );

        let row = self
            .conn
            .query_row(&sql, params![query, bound], map_row)
            .optional()
            .map_err(schema_hint)?;
        Ok(row)
    }
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<IndexRow> {
    Ok(IndexRow { rowid: row.get(0)?, command: row.get(1)?, timestamp: row.get(2)? })
}

/// Attach an actionable hint when the schema has not been provisioned
fn schema_hint(err: rusqlite::Error) -> anyhow::Error {
    let msg = err.to_string();
    if msg.contains("no such table") {
        anyhow::Error::new(err)
            .context("Index store is not provisioned; run `scribe init` or `scribe reset-index`")
    } else {
        anyhow::Error::new(err).context("Index store query failed")
    }
}
