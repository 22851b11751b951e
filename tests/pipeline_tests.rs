//! Integration tests for the enrichment pipeline
//!
//! These tests drive the full pipeline with deterministic resolvers:
//! a static DNS table, a scripted geolocation chain, and (where the CDN
//! probe is exercised) a wiremock HTTP server.

use async_trait::async_trait;
use hostlens::config::{CdnConfig, EnrichmentConfig};
use hostlens::enrich::{
    CdnClassifier, DnsResolve, EnrichmentPipeline, GeoProvider, GeoResolver, RecordEnricher,
    ResolutionError,
};
use hostlens::record::{CdnVerdict, Location, RawRecord};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// DNS resolver with a fixed answer table
struct StubDns {
    answers: HashMap<String, Vec<String>>,
}

impl StubDns {
    fn new(answers: &[(&str, &[&str])]) -> Self {
        Self {
            answers: answers
                .iter()
                .map(|(host, ips)| {
                    (
                        host.to_string(),
                        ips.iter().map(|ip| ip.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }
}

#[async_trait]
impl DnsResolve for StubDns {
    async fn resolve(&self, hostname: &str) -> Result<HashSet<String>, ResolutionError> {
        match self.answers.get(hostname) {
            Some(ips) => Ok(ips.iter().cloned().collect()),
            None => Err(ResolutionError::Lookup {
                hostname: hostname.to_string(),
                message: "no records".to_string(),
            }),
        }
    }
}

/// Geolocation provider with a fixed IP-to-label table
struct StubGeo {
    labels: HashMap<String, String>,
}

impl StubGeo {
    fn new(labels: &[(&str, &str)]) -> Self {
        Self {
            labels: labels
                .iter()
                .map(|(ip, label)| (ip.to_string(), label.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl GeoProvider for StubGeo {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn attempt(&self, ip: &str) -> Option<Location> {
        self.labels.get(ip).map(|label| Location {
            label: label.clone(),
        })
    }
}

fn enrichment_config() -> EnrichmentConfig {
    EnrichmentConfig {
        max_concurrent_lookups: 4,
        probe_timeout_ms: 1000,
        dns_timeout_ms: 1000,
    }
}

/// Builds a pipeline over deterministic resolvers
fn build_test_pipeline(dns: StubDns, geo: StubGeo, concurrency: usize) -> EnrichmentPipeline {
    let classifier = CdnClassifier::new(
        &enrichment_config(),
        CdnConfig::default().providers,
        Arc::new(dns),
    )
    .unwrap();

    let resolver = GeoResolver::from_providers(vec![Box::new(geo)]);

    EnrichmentPipeline::new(RecordEnricher::new(classifier, resolver), concurrency)
}

fn raw(ip: &str, port: u16, hostname: Option<&str>) -> RawRecord {
    RawRecord {
        ip: ip.to_string(),
        port,
        hostname: hostname.map(|h| h.to_string()),
    }
}

#[tokio::test]
async fn test_pipeline_preserves_input_order() {
    // Single A-records everywhere: no probe traffic at all
    let dns = StubDns::new(&[
        ("a.example", &["1.1.1.1"]),
        ("b.example", &["2.2.2.2"]),
        ("c.example", &["3.3.3.3"]),
    ]);
    let geo = StubGeo::new(&[
        ("1.1.1.1", "Beijing"),
        ("2.2.2.2", "Shanghai"),
        ("3.3.3.3", "Shenzhen"),
    ]);

    let pipeline = build_test_pipeline(dns, geo, 4);
    let records = pipeline
        .run(vec![
            raw("1.1.1.1", 80, Some("a.example")),
            raw("2.2.2.2", 443, Some("b.example")),
            raw("3.3.3.3", 8080, Some("c.example")),
        ])
        .await;

    assert_eq!(records.len(), 3);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.index, i + 1);
    }
    assert_eq!(records[0].hostname, "a.example");
    assert_eq!(records[1].hostname, "b.example");
    assert_eq!(records[2].hostname, "c.example");

    assert_eq!(records[0].location.as_ref().unwrap().label, "Beijing");
    assert_eq!(records[2].location.as_ref().unwrap().label, "Shenzhen");
    assert!(records.iter().all(|r| r.cdn == CdnVerdict::NotCdn));
}

#[tokio::test]
async fn test_invalid_records_consume_no_index() {
    let dns = StubDns::new(&[("a.example", &["1.1.1.1"]), ("c.example", &["3.3.3.3"])]);
    let geo = StubGeo::new(&[]);

    let pipeline = build_test_pipeline(dns, geo, 4);
    let records = pipeline
        .run(vec![
            raw("1.1.1.1", 80, Some("a.example")),
            raw("2.2.2.2", 22, None),
            raw("3.3.3.3", 80, Some("c.example")),
        ])
        .await;

    // The invalid middle record is skipped and indices stay dense
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].index, 1);
    assert_eq!(records[0].hostname, "a.example");
    assert_eq!(records[1].index, 2);
    assert_eq!(records[1].hostname, "c.example");
}

#[tokio::test]
async fn test_failed_lookups_degrade_fields_not_records() {
    // DNS knows nothing, geo knows nothing: every lookup fails
    let dns = StubDns::new(&[]);
    let geo = StubGeo::new(&[]);

    let pipeline = build_test_pipeline(dns, geo, 4);
    let records = pipeline
        .run(vec![
            raw("1.1.1.1", 80, Some("a.example")),
            raw("2.2.2.2", 80, Some("b.example")),
        ])
        .await;

    assert_eq!(records.len(), 2);
    for record in &records {
        assert!(record.location.is_none());
        // Failed resolution counts as multiplicity 0
        assert_eq!(record.cdn, CdnVerdict::NotCdn);
    }
}

#[tokio::test]
async fn test_cdn_verdict_flows_into_output() {
    let server = MockServer::start().await;
    let host = server.address().to_string();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).insert_header("Server", "AkamaiGHost"))
        .mount(&server)
        .await;

    let dns = StubDns::new(&[(host.as_str(), &["1.1.1.1", "2.2.2.2"])]);
    let geo = StubGeo::new(&[("9.9.9.9", "Somewhere")]);

    let pipeline = build_test_pipeline(dns, geo, 2);
    let records = pipeline.run(vec![raw("9.9.9.9", 80, Some(&host))]).await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].cdn, CdnVerdict::Cdn("akamai".to_string()));
    assert_eq!(records[0].location.as_ref().unwrap().label, "Somewhere");
}

#[tokio::test]
async fn test_enrichment_is_idempotent() {
    let page = vec![
        raw("1.1.1.1", 80, Some("a.example")),
        raw("2.2.2.2", 443, Some("b.example")),
        raw("3.3.3.3", 21, None),
    ];

    let build = || {
        build_test_pipeline(
            StubDns::new(&[("a.example", &["1.1.1.1"]), ("b.example", &["2.2.2.2"])]),
            StubGeo::new(&[("1.1.1.1", "Beijing"), ("2.2.2.2", "Shanghai")]),
            4,
        )
    };

    let first = build().run(page.clone()).await;
    let second = build().run(page).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_single_worker_produces_same_result_as_pool() {
    let page = vec![
        raw("1.1.1.1", 80, Some("a.example")),
        raw("2.2.2.2", 443, Some("b.example")),
        raw("3.3.3.3", 8443, Some("c.example")),
    ];
    let answers: &[(&str, &[&str])] = &[
        ("a.example", &["1.1.1.1"]),
        ("b.example", &["2.2.2.2"]),
        ("c.example", &["3.3.3.3"]),
    ];
    let labels = &[("1.1.1.1", "A"), ("2.2.2.2", "B"), ("3.3.3.3", "C")];

    let sequential = build_test_pipeline(StubDns::new(answers), StubGeo::new(labels), 1)
        .run(page.clone())
        .await;
    let pooled = build_test_pipeline(StubDns::new(answers), StubGeo::new(labels), 8)
        .run(page)
        .await;

    assert_eq!(sequential, pooled);
}

#[tokio::test]
async fn test_empty_page_yields_empty_sequence() {
    let pipeline = build_test_pipeline(StubDns::new(&[]), StubGeo::new(&[]), 4);
    let records = pipeline.run(vec![]).await;
    assert!(records.is_empty());
}
