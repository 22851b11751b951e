//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{ResultRow, Storage, StorageResult};
use crate::HostlensError;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(HostlensError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, HostlensError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self, HostlensError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl Storage for SqliteStorage {
    fn append_results(&mut self, rows: &[ResultRow]) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO search_results (hostname, ip, port, created_at) VALUES (?1, ?2, ?3, ?4)",
            )?;

            for row in rows {
                stmt.execute(params![row.hostname, row.ip, row.port, now])?;
            }
        }
        tx.commit()?;

        Ok(())
    }

    fn count_results(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM search_results", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
