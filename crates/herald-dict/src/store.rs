//! Dictionary persistence.
//!
//! The store is a write-through collaborator: the full entry set is loaded
//! once at startup and every mutation is persisted before it lands in
//! memory. Storage format beyond the shipped schema is not a contract.

use std::path::Path;

use async_trait::async_trait;
use rusqlite::{params, Connection};
use tokio::sync::Mutex;

use crate::error::DictError;
use crate::lexicon::DictEntry;

/// Persistence seam for the dictionary.
#[async_trait]
pub trait DictStore: Send + Sync {
    /// Reads every stored entry in insertion order.
    async fn load(&self) -> Result<Vec<DictEntry>, DictError>;
    /// Inserts the entry, or replaces the reading of an existing word
    /// without disturbing its position.
    async fn upsert(&self, entry: &DictEntry) -> Result<(), DictError>;
    /// Deletes a word. Deleting an absent word is not an error.
    async fn delete(&self, word: &str) -> Result<(), DictError>;
}

/// A store that keeps nothing: entries live only as long as the process.
/// Used by tests and dictionary-less dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore;

#[async_trait]
impl DictStore for MemoryStore {
    async fn load(&self) -> Result<Vec<DictEntry>, DictError> {
        Ok(Vec::new())
    }

    async fn upsert(&self, _entry: &DictEntry) -> Result<(), DictError> {
        Ok(())
    }

    async fn delete(&self, _word: &str) -> Result<(), DictError> {
        Ok(())
    }
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS dictionary_entries (
    word     TEXT PRIMARY KEY,
    reading  TEXT NOT NULL,
    position INTEGER NOT NULL
);
";

/// SQLite-backed store.
///
/// A single connection behind a mutex is enough here: mutations arrive at
/// user-command rate and are single statements.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path` and applies the
    /// schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DictError> {
        Self::init(Connection::open(path)?)
    }

    /// Opens a private in-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self, DictError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, DictError> {
        // In-memory databases report "memory" here, which is acceptable.
        let _journal_mode: String =
            conn.query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))?;
        conn.execute_batch("PRAGMA busy_timeout = 5000;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl DictStore for SqliteStore {
    async fn load(&self) -> Result<Vec<DictEntry>, DictError> {
        let conn = self.conn.lock().await;
        let mut stmt =
            conn.prepare("SELECT word, reading FROM dictionary_entries ORDER BY position ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok(DictEntry {
                word: row.get(0)?,
                reading: row.get(1)?,
            })
        })?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    async fn upsert(&self, entry: &DictEntry) -> Result<(), DictError> {
        let conn = self.conn.lock().await;
        // New words take the next position; redefinitions keep the row's
        // existing position, assigned in a single statement to avoid a
        // read-modify-write race between writers.
        conn.execute(
            "INSERT INTO dictionary_entries (word, reading, position)
             VALUES (
                ?1, ?2,
                (SELECT COALESCE(MAX(position), -1) + 1 FROM dictionary_entries)
             )
             ON CONFLICT(word) DO UPDATE SET reading = excluded.reading",
            params![entry.word, entry.reading],
        )?;
        Ok(())
    }

    async fn delete(&self, word: &str) -> Result<(), DictError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "DELETE FROM dictionary_entries WHERE word = ?1",
            params![word],
        )?;
        Ok(())
    }
}
