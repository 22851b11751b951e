use crate::record::RawRecord;
use serde::{Deserialize, Serialize};

/// Request body for the upstream search endpoint
#[derive(Debug, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub start: u32,
    // Upstream expects the page size as a JSON string
    pub size: String,
}

/// Pagination metadata from the upstream response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    pub page_index: u64,
    pub page_size: u64,
    pub total: u64,
}

/// One page of raw search results
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub pagination: Pagination,
    pub records: Vec<RawRecord>,
}

// ===== Upstream wire format =====

#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    pub meta: ApiMeta,
    pub data: Vec<ApiRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiMeta {
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiRecord {
    pub ip: String,
    pub port: u16,
    #[serde(default)]
    pub service: Option<ApiService>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiService {
    #[serde(default)]
    pub http: Option<ApiHttpService>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiHttpService {
    pub host: String,
}

impl ApiRecord {
    /// Flattens the nested service block into a raw record
    pub fn into_raw(self) -> RawRecord {
        let hostname = self.service.and_then(|s| s.http).map(|h| h.host);
        RawRecord {
            ip: self.ip,
            port: self.port,
            hostname,
        }
    }
}
