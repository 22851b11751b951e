//! Configuration module for hostlens
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use hostlens::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("hostlens.toml")).unwrap();
//! println!("Concurrency limit: {}", config.enrichment.max_concurrent_lookups);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CdnConfig, Config, EnrichmentConfig, GeoConfig, OutputConfig, SearchConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
