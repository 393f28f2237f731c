//! Scribe - record shell history and search it incrementally
//!
//! Every executed command is stored twice:
//!
//! - appended to a versioned, line-oriented log under `~/.scribe/history/`,
//!   which is the source of truth
//! - mirrored into a SQLite index under `~/.scribe/data/`, which is a
//!   disposable cache that can be rebuilt from the log at any time
//!
//! Search runs against the index only, either as a one-shot listing of recent
//! matches or as an interactive reverse search that steps through matches on
//! the terminal.
//!
//! # Example
//!
//! ```no_run
//! use scribe::{IndexStore, LogStore, Recorder, SearchEngine, StorageLayout};
//!
//! let layout = StorageLayout::new("/home/alice/.scribe");
//! layout.ensure()?;
//! let log = LogStore::new(&layout);
//! let index = IndexStore::open(&layout.index_path())?;
//! index.provision()?;
//!
//! Recorder::new(&log, &index).record("git status", 1_700_000_000)?;
//! for row in SearchEngine::new(&index).list_recent("git")? {
//!     println!("{}", row.label());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod index_storage;
pub mod indexer;
pub mod log_store;
pub mod models;
pub mod parsers;
pub mod recorder;
pub mod search;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use index_storage::IndexStore;
pub use indexer::{migrate_history, rebuild_index, upgrade_segment};
pub use log_store::LogStore;
pub use models::{Direction, IndexRow, LogEntry, Position, SearchCursor, SearchOutcome};
pub use recorder::{RecordOutcome, Recorder};
pub use search::{SearchEngine, Searcher};
pub use utils::StorageLayout;
