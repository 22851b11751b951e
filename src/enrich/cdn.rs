//! CDN classification
//!
//! Decides whether a hostname is CDN-fronted and, if so, which provider.
//! The check is a two-stage heuristic:
//!
//! 1. DNS multiplicity gate - a hostname resolving to fewer than two
//!    IPv4 addresses is assumed dedicated, and no probe is issued.
//! 2. Server-header probe - a plain HTTP GET against the hostname; the
//!    response Server header is matched case-insensitively against the
//!    configured provider catalog.
//!
//! Both stages are best-effort. Lookup and probe failures degrade to
//! `CdnVerdict::Unknown` and never fail the record.

use crate::config::EnrichmentConfig;
use crate::enrich::dns::DnsResolve;
use crate::record::CdnVerdict;
use crate::HostlensError;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Hosts resolving to fewer A-records than this are treated as dedicated
const CDN_MULTIPLICITY_THRESHOLD: usize = 2;

/// Classifies hostnames against a CDN provider catalog
pub struct CdnClassifier {
    dns: Arc<dyn DnsResolve>,
    http: Client,
    catalog: Vec<String>,
}

impl CdnClassifier {
    /// Creates a classifier with the given resolver and provider catalog
    pub fn new(
        config: &EnrichmentConfig,
        catalog: Vec<String>,
        dns: Arc<dyn DnsResolve>,
    ) -> Result<Self, HostlensError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.probe_timeout_ms))
            .build()?;

        Ok(Self { dns, http, catalog })
    }

    /// Classifies a single hostname
    pub async fn classify(&self, hostname: &str) -> CdnVerdict {
        let multiplicity = match self.dns.resolve(hostname).await {
            Ok(addrs) => addrs.len(),
            Err(e) => {
                tracing::debug!(hostname, error = %e, "DNS lookup failed, multiplicity unknown");
                0
            }
        };

        if multiplicity < CDN_MULTIPLICITY_THRESHOLD {
            return CdnVerdict::NotCdn;
        }

        self.probe_server_header(hostname).await
    }

    /// Probes `http://{hostname}` and matches the Server header against
    /// the catalog
    async fn probe_server_header(&self, hostname: &str) -> CdnVerdict {
        let url = format!("http://{}", hostname);

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(hostname, error = %e, "CDN probe failed");
                return CdnVerdict::Unknown;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(
                hostname,
                status = response.status().as_u16(),
                "CDN probe returned non-success status"
            );
            return CdnVerdict::Unknown;
        }

        let server = response
            .headers()
            .get(reqwest::header::SERVER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        for provider in &self.catalog {
            if server.contains(&provider.to_ascii_lowercase()) {
                return CdnVerdict::Cdn(provider.clone());
            }
        }

        CdnVerdict::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CdnConfig;
    use crate::enrich::dns::testing::StaticDns;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_enrichment_config() -> EnrichmentConfig {
        EnrichmentConfig {
            max_concurrent_lookups: 4,
            probe_timeout_ms: 1000,
            dns_timeout_ms: 1000,
        }
    }

    fn classifier_with(dns: StaticDns) -> CdnClassifier {
        CdnClassifier::new(
            &test_enrichment_config(),
            CdnConfig::default().providers,
            Arc::new(dns),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_single_address_skips_probe() {
        let server = MockServer::start().await;
        let host = server.address().to_string();

        // Any probe against the mock server fails the test
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let dns = StaticDns::new(&[(host.as_str(), &["1.1.1.1"])]);
        let verdict = classifier_with(dns).classify(&host).await;

        assert_eq!(verdict, CdnVerdict::NotCdn);
    }

    #[tokio::test]
    async fn test_dns_failure_treated_as_dedicated() {
        let dns = StaticDns::new(&[]);
        let verdict = classifier_with(dns).classify("unresolvable.example").await;

        assert_eq!(verdict, CdnVerdict::NotCdn);
    }

    #[tokio::test]
    async fn test_cataloged_server_header_matches_case_insensitively() {
        let server = MockServer::start().await;
        let host = server.address().to_string();

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).insert_header("Server", "CloudFlare-nginx"))
            .expect(1)
            .mount(&server)
            .await;

        let dns = StaticDns::new(&[(host.as_str(), &["1.1.1.1", "2.2.2.2"])]);
        let verdict = classifier_with(dns).classify(&host).await;

        // Canonical catalog name, not the raw header value
        assert_eq!(verdict, CdnVerdict::Cdn("cloudflare".to_string()));
    }

    #[tokio::test]
    async fn test_unrecognized_server_header_is_unknown() {
        let server = MockServer::start().await;
        let host = server.address().to_string();

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).insert_header("Server", "nginx/1.24.0"))
            .mount(&server)
            .await;

        let dns = StaticDns::new(&[(host.as_str(), &["1.1.1.1", "2.2.2.2"])]);
        let verdict = classifier_with(dns).classify(&host).await;

        assert_eq!(verdict, CdnVerdict::Unknown);
    }

    #[tokio::test]
    async fn test_missing_server_header_is_unknown() {
        let server = MockServer::start().await;
        let host = server.address().to_string();

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let dns = StaticDns::new(&[(host.as_str(), &["1.1.1.1", "2.2.2.2"])]);
        let verdict = classifier_with(dns).classify(&host).await;

        assert_eq!(verdict, CdnVerdict::Unknown);
    }

    #[tokio::test]
    async fn test_error_status_is_unknown() {
        let server = MockServer::start().await;
        let host = server.address().to_string();

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).insert_header("Server", "cloudflare"))
            .mount(&server)
            .await;

        let dns = StaticDns::new(&[(host.as_str(), &["1.1.1.1", "2.2.2.2"])]);
        let verdict = classifier_with(dns).classify(&host).await;

        assert_eq!(verdict, CdnVerdict::Unknown);
    }

    #[tokio::test]
    async fn test_unreachable_probe_is_unknown() {
        // Reserved TEST-NET address, nothing listens there
        let dns = StaticDns::new(&[("192.0.2.1:1", &["1.1.1.1", "2.2.2.2"])]);
        let verdict = classifier_with(dns).classify("192.0.2.1:1").await;

        assert_eq!(verdict, CdnVerdict::Unknown);
    }
}
