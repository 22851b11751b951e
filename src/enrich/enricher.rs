//! Per-record enrichment
//!
//! Combines the CDN classifier and the geolocation resolver for one
//! validated record. The two lookups have no data dependency, so they run
//! concurrently. Retries and failure handling belong to the sub-resolvers;
//! the enricher only assembles their results.

use crate::enrich::cdn::CdnClassifier;
use crate::enrich::geo::GeoResolver;
use crate::record::{EnrichedRecord, ValidRecord};

/// Enriches validated records with CDN and location data
pub struct RecordEnricher {
    classifier: CdnClassifier,
    geo: GeoResolver,
}

impl RecordEnricher {
    /// Creates an enricher from its two sub-resolvers
    pub fn new(classifier: CdnClassifier, geo: GeoResolver) -> Self {
        Self { classifier, geo }
    }

    /// Enriches one record
    ///
    /// # Arguments
    ///
    /// * `record` - A validated record (hostname present)
    /// * `index` - The record's 1-based position among valid records
    pub async fn enrich(&self, record: ValidRecord, index: usize) -> EnrichedRecord {
        let (cdn, location) = tokio::join!(
            self.classifier.classify(&record.hostname),
            self.geo.locate(&record.ip),
        );

        EnrichedRecord {
            index,
            hostname: record.hostname,
            ip: record.ip,
            port: record.port,
            location,
            cdn,
        }
    }
}
