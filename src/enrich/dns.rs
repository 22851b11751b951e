//! DNS resolver adapter
//!
//! Resolves hostnames to their set of IPv4 addresses. The CDN classifier
//! only uses the multiplicity of the result set, so lookup failures are
//! recoverable: callers treat them as "multiplicity unknown".

use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::system_conf::read_system_conf;
use hickory_resolver::TokioAsyncResolver;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

/// Errors from a DNS lookup
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("DNS lookup failed for {hostname}: {message}")]
    Lookup { hostname: String, message: String },
}

/// Trait for hostname-to-IPv4 resolution
///
/// Implementations must be safe to share across enrichment workers.
/// Tests inject deterministic resolvers through this seam.
#[async_trait]
pub trait DnsResolve: Send + Sync {
    /// Resolves a hostname to its set of IPv4 address strings
    async fn resolve(&self, hostname: &str) -> Result<HashSet<String>, ResolutionError>;
}

/// Production resolver backed by hickory-dns
pub struct HickoryDns {
    resolver: TokioAsyncResolver,
}

impl HickoryDns {
    /// Creates a resolver from system DNS configuration
    ///
    /// Falls back to the public default configuration when the system
    /// config cannot be read (containers without /etc/resolv.conf).
    pub fn new(lookup_timeout: Duration) -> Self {
        let (config, mut opts) = match read_system_conf() {
            Ok(parts) => {
                tracing::debug!("Using system DNS configuration");
                parts
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read system DNS config, using defaults");
                (ResolverConfig::default(), ResolverOpts::default())
            }
        };

        opts.timeout = lookup_timeout;

        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
        }
    }
}

#[async_trait]
impl DnsResolve for HickoryDns {
    async fn resolve(&self, hostname: &str) -> Result<HashSet<String>, ResolutionError> {
        let lookup = self
            .resolver
            .lookup_ip(hostname)
            .await
            .map_err(|e| ResolutionError::Lookup {
                hostname: hostname.to_string(),
                message: e.to_string(),
            })?;

        Ok(lookup
            .iter()
            .filter(|ip| ip.is_ipv4())
            .map(|ip| ip.to_string())
            .collect())
    }
}
