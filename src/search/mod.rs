//! Upstream asset-search client
//!
//! This module treats the search service as a black box: it sends an
//! authenticated query and hands back a page of raw records plus
//! pagination metadata. All decision logic lives in the enrichment
//! pipeline, not here.

mod client;
mod types;

pub use client::SearchClient;
pub use types::{Pagination, SearchPage};
