use crate::config::types::{Config, EnrichmentConfig, GeoConfig, OutputConfig, SearchConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_search_config(&config.search)?;
    validate_enrichment_config(&config.enrichment)?;
    validate_geo_config(&config.geo)?;
    validate_output_config(&config.output)?;
    validate_cdn_catalog(&config.cdn.providers)?;
    Ok(())
}

/// Validates search service configuration
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid search endpoint: {}", e)))?;

    if url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Search endpoint must use HTTPS scheme, got '{}'",
            config.endpoint
        )));
    }

    if config.api_key.is_empty() {
        return Err(ConfigError::Validation("api-key cannot be empty".to_string()));
    }

    Ok(())
}

/// Validates enrichment configuration
fn validate_enrichment_config(config: &EnrichmentConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_lookups < 1 || config.max_concurrent_lookups > 64 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_lookups must be between 1 and 64, got {}",
            config.max_concurrent_lookups
        )));
    }

    if config.probe_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "probe_timeout_ms must be >= 100ms, got {}ms",
            config.probe_timeout_ms
        )));
    }

    if config.dns_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "dns_timeout_ms must be >= 100ms, got {}ms",
            config.dns_timeout_ms
        )));
    }

    Ok(())
}

/// Validates geolocation provider configuration
fn validate_geo_config(config: &GeoConfig) -> Result<(), ConfigError> {
    Url::parse(&config.primary_endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid primary geo endpoint: {}", e)))?;

    Url::parse(&config.fallback_endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid fallback geo endpoint: {}", e)))?;

    if config.language.is_empty() {
        return Err(ConfigError::Validation(
            "geo language cannot be empty".to_string(),
        ));
    }

    if config.timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "geo timeout_ms must be >= 100ms, got {}ms",
            config.timeout_ms
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    if config.export_dir.is_empty() {
        return Err(ConfigError::Validation(
            "export_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the CDN provider catalog
fn validate_cdn_catalog(providers: &[String]) -> Result<(), ConfigError> {
    if providers.is_empty() {
        return Err(ConfigError::Validation(
            "CDN provider catalog cannot be empty".to_string(),
        ));
    }

    for provider in providers {
        if provider.trim().is_empty() {
            return Err(ConfigError::Validation(
                "CDN provider names cannot be blank".to_string(),
            ));
        }
    }

    Ok(())
}
