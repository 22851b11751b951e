//! Record types for the enrichment pipeline
//!
//! This module defines the data model shared by the search client, the
//! enrichment pipeline, and the output sinks.

use std::fmt;

/// A raw host record as returned by the upstream search service
///
/// The hostname is optional: upstream records without an HTTP service block
/// carry no hostname and are excluded from enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// IP address of the host
    pub ip: String,

    /// Port the service was found on
    pub port: u16,

    /// Hostname from the HTTP service block, if present
    pub hostname: Option<String>,
}

impl RawRecord {
    /// Converts this record into its validated form, if it has a hostname
    pub fn into_valid(self) -> Option<ValidRecord> {
        let RawRecord { ip, port, hostname } = self;
        hostname.map(|hostname| ValidRecord { hostname, ip, port })
    }
}

/// A raw record that passed validation (hostname is present)
///
/// The enricher only accepts this form, so filtering cannot be skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRecord {
    pub hostname: String,
    pub ip: String,
    pub port: u16,
}

/// Outcome of CDN classification for a hostname
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CdnVerdict {
    /// Multiple A-records but no recognizable provider signature,
    /// or the probe failed
    Unknown,

    /// Single-homed hosting, assumed not CDN-fronted
    NotCdn,

    /// A cataloged CDN provider matched the Server header
    Cdn(String),
}

impl CdnVerdict {
    /// Returns true if a provider was positively identified
    pub fn is_identified(&self) -> bool {
        matches!(self, Self::Cdn(_))
    }
}

impl fmt::Display for CdnVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::NotCdn => write!(f, "none"),
            Self::Cdn(provider) => write!(f, "{}", provider),
        }
    }
}

/// A resolved geographic location for an IP address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Free-text place name (city or formatted address)
    pub label: String,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// A fully enriched host record, ready for the output sinks
///
/// Immutable once produced: sinks consume it read-only. The index is
/// 1-based and dense over the valid records of a page, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedRecord {
    pub index: usize,
    pub hostname: String,
    pub ip: String,
    pub port: u16,
    pub location: Option<Location>,
    pub cdn: CdnVerdict,
}

impl EnrichedRecord {
    /// Builds a record whose lookups never completed
    ///
    /// Used by the pipeline when a worker dies, so the output sequence
    /// keeps its length and index density.
    pub fn degraded(record: ValidRecord, index: usize) -> Self {
        Self {
            index,
            hostname: record.hostname,
            ip: record.ip,
            port: record.port,
            location: None,
            cdn: CdnVerdict::Unknown,
        }
    }

    /// Location label for display, with a placeholder for absent lookups
    pub fn location_label(&self) -> &str {
        self.location.as_ref().map(|l| l.label.as_str()).unwrap_or("unknown")
    }
}
