//! Enrichment pipeline and its resolvers
//!
//! This is the core of hostlens: per-record CDN classification and IP
//! geolocation, aggregated into a stable, ordered output sequence.

mod cdn;
mod dns;
mod enricher;
mod geo;
mod pipeline;

pub use cdn::CdnClassifier;
pub use dns::{DnsResolve, HickoryDns, ResolutionError};
pub use enricher::RecordEnricher;
pub use geo::{GeoProvider, GeoResolver, IpApiProvider, ReverseGeocodeProvider};
pub use pipeline::EnrichmentPipeline;

use crate::config::Config;
use crate::HostlensError;
use std::sync::Arc;
use std::time::Duration;

/// Wires a pipeline from configuration: hickory DNS, probe client, and
/// the default geolocation provider chain
pub fn build_pipeline(config: &Config) -> Result<EnrichmentPipeline, HostlensError> {
    let dns = Arc::new(HickoryDns::new(Duration::from_millis(
        config.enrichment.dns_timeout_ms,
    )));

    let classifier = CdnClassifier::new(
        &config.enrichment,
        config.cdn.providers.clone(),
        dns,
    )?;

    let geo = GeoResolver::new(&config.geo)?;

    let enricher = RecordEnricher::new(classifier, geo);

    Ok(EnrichmentPipeline::new(
        enricher,
        config.enrichment.max_concurrent_lookups as usize,
    ))
}
