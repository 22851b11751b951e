//! Enrichment pipeline
//!
//! Runs the record enricher over a page of raw records:
//! - filters records without a hostname, warning once per skip
//! - assigns dense 1-based indices to the survivors in input order
//! - enriches records on a bounded worker pool
//! - reassembles results by index, so output order is deterministic
//!   regardless of completion order

use crate::enrich::enricher::RecordEnricher;
use crate::record::{EnrichedRecord, RawRecord, ValidRecord};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Orchestrates enrichment of one page of raw records
pub struct EnrichmentPipeline {
    enricher: Arc<RecordEnricher>,
    concurrency: usize,
}

impl EnrichmentPipeline {
    /// Creates a pipeline with the given worker-pool size
    pub fn new(enricher: RecordEnricher, concurrency: usize) -> Self {
        Self {
            enricher: Arc::new(enricher),
            // The pipeline is correct at limit 1; the pool is a
            // throughput option
            concurrency: concurrency.max(1),
        }
    }

    /// Enriches a raw page into an ordered sequence of enriched records
    ///
    /// The output contains exactly one record per valid input record,
    /// indexed `1..=N` in input order. Records whose lookups fail are
    /// emitted with degraded fields, never dropped.
    pub async fn run(&self, raw_page: Vec<RawRecord>) -> Vec<EnrichedRecord> {
        let valid = filter_valid(raw_page);
        let total = valid.len();

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut workers = JoinSet::new();

        for (slot, record) in valid.iter().cloned().enumerate() {
            let enricher = Arc::clone(&self.enricher);
            let semaphore = Arc::clone(&semaphore);

            workers.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                let enriched = enricher.enrich(record, slot + 1).await;
                (slot, enriched)
            });
        }

        // Write-once slots keyed by index restore input order
        let mut slots: Vec<Option<EnrichedRecord>> = vec![None; total];
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok((slot, enriched)) => slots[slot] = Some(enriched),
                Err(e) => {
                    tracing::error!(error = %e, "Enrichment worker died");
                }
            }
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(slot, filled)| {
                filled.unwrap_or_else(|| {
                    // A dead worker leaves a hole; emit the record with
                    // degraded fields to preserve sequence length
                    EnrichedRecord::degraded(valid[slot].clone(), slot + 1)
                })
            })
            .collect()
    }
}

/// Filters out records without a hostname, warning once per skip
///
/// The warning names the record's 1-based position in the raw page, which
/// is what the operator sees in the upstream console.
fn filter_valid(raw_page: Vec<RawRecord>) -> Vec<ValidRecord> {
    raw_page
        .into_iter()
        .enumerate()
        .filter_map(|(position, record)| {
            let ip = record.ip.clone();
            match record.into_valid() {
                Some(valid) => Some(valid),
                None => {
                    tracing::warn!(
                        position = position + 1,
                        ip,
                        "Record has no HTTP service block, skipping"
                    );
                    None
                }
            }
        })
        .collect()
}
