//! Persistence sink backed by the storage layer
//!
//! Appends the host identity triple of every enriched record to durable
//! storage. Enrichment fields are not persisted; see the storage module.

use crate::output::traits::{OutputError, OutputResult, RecordSink, ReportContext};
use crate::record::EnrichedRecord;
use crate::storage::{ResultRow, Storage};

/// Sink that appends records to a storage backend
pub struct PersistSink<S: Storage> {
    storage: S,
}

impl<S: Storage> PersistSink<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

impl<S: Storage> RecordSink for PersistSink<S> {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn write(&mut self, _context: &ReportContext, records: &[EnrichedRecord]) -> OutputResult<()> {
        let rows: Vec<ResultRow> = records
            .iter()
            .map(|record| ResultRow {
                hostname: record.hostname.clone(),
                ip: record.ip.clone(),
                port: record.port,
            })
            .collect();

        self.storage
            .append_results(&rows)
            .map_err(|e| OutputError::Storage(e.to_string()))?;

        tracing::info!(rows = rows.len(), "Persisted search results");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CdnVerdict;
    use crate::search::Pagination;
    use crate::storage::SqliteStorage;

    fn context() -> ReportContext {
        ReportContext {
            query: "domain:example.com".to_string(),
            pagination: Pagination {
                page_index: 1,
                page_size: 10,
                total: 2,
            },
        }
    }

    fn record(index: usize) -> EnrichedRecord {
        EnrichedRecord {
            index,
            hostname: format!("host{}.example", index),
            ip: "1.2.3.4".to_string(),
            port: 80,
            location: None,
            cdn: CdnVerdict::Unknown,
        }
    }

    #[test]
    fn test_persists_one_row_per_record() {
        let storage = SqliteStorage::new_in_memory().unwrap();
        let mut sink = PersistSink::new(storage);

        sink.write(&context(), &[record(1), record(2)]).unwrap();

        assert_eq!(sink.storage.count_results().unwrap(), 2);
    }

    #[test]
    fn test_empty_sequence_persists_nothing() {
        let storage = SqliteStorage::new_in_memory().unwrap();
        let mut sink = PersistSink::new(storage);

        sink.write(&context(), &[]).unwrap();

        assert_eq!(sink.storage.count_results().unwrap(), 0);
    }
}
