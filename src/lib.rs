//! Hostlens: asset-search enrichment
//!
//! This crate queries an asset-search service for hosts matching a query,
//! enriches each record with CDN-provider inference and geographic
//! location, and hands the ordered result set to console, database, and
//! spreadsheet sinks.

pub mod config;
pub mod enrich;
pub mod output;
pub mod record;
pub mod search;
pub mod storage;

use thiserror::Error;

/// Main error type for hostlens operations
///
/// Only fatal run errors live here. Per-record lookup failures are
/// absorbed into the enriched record's optional fields and never surface
/// as this type.
#[derive(Debug, Error)]
pub enum HostlensError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Search request failed: {source}")]
    SearchRequest { source: reqwest::Error },

    #[error("Search request rejected with status {status}")]
    SearchStatus { status: u16 },

    #[error("Search response could not be decoded: {source}")]
    SearchDecode { source: reqwest::Error },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for hostlens operations
pub type Result<T> = std::result::Result<T, HostlensError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use record::{CdnVerdict, EnrichedRecord, Location, RawRecord, ValidRecord};
