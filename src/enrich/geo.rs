//! IP geolocation resolution
//!
//! Maps an IP address to a human-readable location label by trying an
//! ordered chain of provider strategies. Every provider implements the
//! same attempt contract, so chains can be rearranged or extended without
//! touching the resolver itself. Provider failures are logged and
//! absorbed; the chain result is simply `None` when every attempt fails.

use crate::config::GeoConfig;
use crate::record::Location;
use crate::HostlensError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// A single geolocation strategy
///
/// `attempt` returns `None` for both provider errors and empty results;
/// providers report their own failures via tracing.
#[async_trait]
pub trait GeoProvider: Send + Sync {
    /// Short provider name used in diagnostics
    fn name(&self) -> &'static str;

    /// Tries to resolve a location for the given IP
    async fn attempt(&self, ip: &str) -> Option<Location>;
}

/// Ordered fallback chain of geolocation providers
pub struct GeoResolver {
    providers: Vec<Box<dyn GeoProvider>>,
}

impl GeoResolver {
    /// Builds the default chain from configuration: ip-api first, then
    /// reverse geocoding
    pub fn new(config: &GeoConfig) -> Result<Self, HostlensError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(concat!("hostlens/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let providers: Vec<Box<dyn GeoProvider>> = vec![
            Box::new(IpApiProvider {
                http: http.clone(),
                endpoint: config.primary_endpoint.clone(),
                language: config.language.clone(),
            }),
            Box::new(ReverseGeocodeProvider {
                http,
                endpoint: config.fallback_endpoint.clone(),
                language: config.language.clone(),
            }),
        ];

        Ok(Self { providers })
    }

    /// Builds a resolver from an explicit provider chain
    pub fn from_providers(providers: Vec<Box<dyn GeoProvider>>) -> Self {
        Self { providers }
    }

    /// Resolves a location for the given IP, first success wins
    pub async fn locate(&self, ip: &str) -> Option<Location> {
        for provider in &self.providers {
            if let Some(location) = provider.attempt(ip).await {
                tracing::debug!(ip, provider = provider.name(), label = %location.label, "Location resolved");
                return Some(location);
            }
        }

        tracing::debug!(ip, "No geolocation provider returned a result");
        None
    }
}

// ===== ip-api.com style provider =====

/// Fast IP-geolocation web service (primary)
pub struct IpApiProvider {
    pub(crate) http: Client,
    pub(crate) endpoint: String,
    pub(crate) language: String,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    city: Option<String>,
}

#[async_trait]
impl GeoProvider for IpApiProvider {
    fn name(&self) -> &'static str {
        "ip-api"
    }

    async fn attempt(&self, ip: &str) -> Option<Location> {
        let url = format!("{}/{}?lang={}", self.endpoint, ip, self.language);

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(ip, error = %e, "ip-api request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(ip, status = response.status().as_u16(), "ip-api returned error status");
            return None;
        }

        let body: IpApiResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(ip, error = %e, "ip-api returned malformed body");
                return None;
            }
        };

        if body.status != "success" {
            return None;
        }

        body.city
            .filter(|city| !city.is_empty())
            .map(|label| Location { label })
    }
}

// ===== Reverse-geocoding provider (fallback) =====

/// General-purpose geocoding service queried with the bare IP (fallback)
pub struct ReverseGeocodeProvider {
    pub(crate) http: Client,
    pub(crate) endpoint: String,
    pub(crate) language: String,
}

#[derive(Debug, Deserialize)]
struct GeocodePlace {
    display_name: String,
}

#[async_trait]
impl GeoProvider for ReverseGeocodeProvider {
    fn name(&self) -> &'static str {
        "reverse-geocode"
    }

    async fn attempt(&self, ip: &str) -> Option<Location> {
        let url = format!(
            "{}?q={}&format=json&accept-language={}&limit=1",
            self.endpoint, ip, self.language
        );

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(ip, error = %e, "Reverse geocode request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(
                ip,
                status = response.status().as_u16(),
                "Reverse geocode returned error status"
            );
            return None;
        }

        let places: Vec<GeocodePlace> = match response.json().await {
            Ok(places) => places,
            Err(e) => {
                tracing::debug!(ip, error = %e, "Reverse geocode returned malformed body");
                return None;
            }
        };

        places
            .into_iter()
            .next()
            .map(|place| Location {
                label: place.display_name,
            })
    }
}
