//! Output sink trait and shared types

use crate::record::EnrichedRecord;
use crate::search::Pagination;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Run-level context shared by all sinks
#[derive(Debug, Clone)]
pub struct ReportContext {
    /// The query string the records were found with
    pub query: String,

    /// Pagination metadata from the upstream response
    pub pagination: Pagination,
}

/// Trait for enriched-record consumers
///
/// Sinks receive the complete, ordered sequence exactly once per run and
/// must not mutate it.
pub trait RecordSink {
    /// Short sink name used in diagnostics
    fn name(&self) -> &'static str;

    /// Consumes the ordered enriched-record sequence
    fn write(&mut self, context: &ReportContext, records: &[EnrichedRecord]) -> OutputResult<()>;
}
