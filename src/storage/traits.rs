//! Storage traits and error types

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A persisted search result row
///
/// Deliberately narrower than `EnrichedRecord`: the reference schema keeps
/// only the host identity triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub hostname: String,
    pub ip: String,
    pub port: u16,
}

/// Trait for storage backend implementations
pub trait Storage {
    /// Appends a batch of result rows
    fn append_results(&mut self, rows: &[ResultRow]) -> StorageResult<()>;

    /// Counts all persisted result rows
    fn count_results(&self) -> StorageResult<u64>;
}
