//! Upstream search service client
//!
//! This is the only component whose failures abort the whole run: without
//! a complete raw page there is nothing meaningful to enrich or export.

use crate::config::SearchConfig;
use crate::search::types::{ApiResponse, SearchPage, SearchRequest};
use crate::HostlensError;
use reqwest::Client;
use std::time::Duration;

/// Header carrying the API key, per the upstream protocol
const TOKEN_HEADER: &str = "X-QuakeToken";

/// Client for the asset-search service
pub struct SearchClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl SearchClient {
    /// Creates a new search client from configuration
    pub fn new(config: &SearchConfig) -> Result<Self, HostlensError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Runs a search and returns one page of raw records
    ///
    /// # Arguments
    ///
    /// * `query` - Search expression in the upstream query language
    /// * `size` - Number of results requested
    /// * `page` - 1-based page index
    ///
    /// # Returns
    ///
    /// * `Ok(SearchPage)` - Pagination metadata plus the raw records
    /// * `Err(HostlensError)` - Request failed, non-2xx status, or
    ///   malformed response body
    pub async fn search(
        &self,
        query: &str,
        size: u32,
        page: u32,
    ) -> Result<SearchPage, HostlensError> {
        let request = SearchRequest {
            query: query.to_string(),
            start: page,
            size: size.to_string(),
        };

        tracing::debug!(query, size, page, "Sending search request");

        let response = self
            .http
            .post(&self.endpoint)
            .header(TOKEN_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|source| HostlensError::SearchRequest { source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HostlensError::SearchStatus {
                status: status.as_u16(),
            });
        }

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|source| HostlensError::SearchDecode { source })?;

        let records = body.data.into_iter().map(|r| r.into_raw()).collect();

        Ok(SearchPage {
            pagination: body.meta.pagination,
            records,
        })
    }
}
