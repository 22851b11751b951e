//! Database schema definitions
//!
//! This module contains the SQL schema for the hostlens results database.

/// SQL schema for the database
///
/// Only the host identity triple is persisted; CDN verdicts and locations
/// appear in the table and spreadsheet outputs but are not stored.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS search_results (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    hostname TEXT NOT NULL,
    ip TEXT NOT NULL,
    port INTEGER NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_search_results_hostname ON search_results(hostname);
CREATE INDEX IF NOT EXISTS idx_search_results_ip ON search_results(ip);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)
}
