//! SQLite index store.
//!
//! A single `history` table mirrors the log so search can run as plain
//! queries ordered by `rowid`. The connection is opened and closed within one
//! CLI invocation; there is no pooling and no multi-statement transaction.

pub mod db;

pub use db::IndexStore;
