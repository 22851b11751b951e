use serde::Deserialize;

/// Main configuration structure for hostlens
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub search: SearchConfig,
    pub enrichment: EnrichmentConfig,
    #[serde(default)]
    pub geo: GeoConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub cdn: CdnConfig,
}

/// Upstream search service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Search API endpoint URL
    pub endpoint: String,

    /// API key sent with every search request
    #[serde(rename = "api-key")]
    pub api_key: String,
}

/// Enrichment pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EnrichmentConfig {
    /// Maximum number of records enriched concurrently
    #[serde(rename = "max-concurrent-lookups")]
    pub max_concurrent_lookups: u32,

    /// Timeout for the CDN HTTP probe (milliseconds)
    #[serde(rename = "probe-timeout-ms")]
    pub probe_timeout_ms: u64,

    /// Timeout for a single DNS lookup (milliseconds)
    #[serde(rename = "dns-timeout-ms")]
    pub dns_timeout_ms: u64,
}

/// Geolocation provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GeoConfig {
    /// Fast IP-geolocation service, tried first
    #[serde(rename = "primary-endpoint", default = "default_primary_endpoint")]
    pub primary_endpoint: String,

    /// Reverse-geocoding service, tried when the primary fails
    #[serde(rename = "fallback-endpoint", default = "default_fallback_endpoint")]
    pub fallback_endpoint: String,

    /// Response language requested from both providers
    #[serde(default = "default_language")]
    pub language: String,

    /// Timeout for a single provider attempt (milliseconds)
    #[serde(rename = "timeout-ms", default = "default_geo_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            primary_endpoint: default_primary_endpoint(),
            fallback_endpoint: default_fallback_endpoint(),
            language: default_language(),
            timeout_ms: default_geo_timeout_ms(),
        }
    }
}

fn default_primary_endpoint() -> String {
    "http://ip-api.com/json".to_string()
}

fn default_fallback_endpoint() -> String {
    "https://nominatim.openstreetmap.org/search".to_string()
}

fn default_language() -> String {
    "zh-CN".to_string()
}

fn default_geo_timeout_ms() -> u64 {
    5000
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Directory the spreadsheet export is written into
    #[serde(rename = "export-dir")]
    pub export_dir: String,
}

/// CDN provider catalog
///
/// Entries are canonical provider names, matched case-insensitively as
/// substrings of the HTTP Server header.
#[derive(Debug, Clone, Deserialize)]
pub struct CdnConfig {
    #[serde(default = "default_cdn_providers")]
    pub providers: Vec<String>,
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            providers: default_cdn_providers(),
        }
    }
}

fn default_cdn_providers() -> Vec<String> {
    [
        "cloudflare",
        "akamai",
        "fastly",
        "maxcdn",
        "cloudfront",
        "azure cdn",
        "google cloud cdn",
        "stackpath",
        "limelight",
        "incapsula",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
