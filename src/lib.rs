//! SAR-Sweep: a batch search runner for SAR satellite catalogs
//!
//! This crate wraps a remote STAC catalog search API with a typed client and
//! drives ordered lists of named region/time-window search tasks through it,
//! isolating failures per task and aggregating results.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod geo;
pub mod loader;
pub mod output;
pub mod runner;

use thiserror::Error;

/// Main error type for SAR-Sweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Catalog API returned HTTP {status} for {url}")]
    Api { url: String, status: u16 },

    #[error("Failed to decode catalog response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Failed to obtain signing token for collection '{collection}': {message}")]
    Signing { collection: String, message: String },

    #[error("No items found for bbox={bbox}, datetime={datetime}")]
    EmptySearch { bbox: String, datetime: String },

    #[error("Geometry error: {0}")]
    Geo(#[from] GeoError),

    #[error("Scene loading error: {0}")]
    Load(#[from] loader::LoadError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] analysis::AnalysisError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid task '{name}': {message}")]
    InvalidTask { name: String, message: String },
}

/// Errors for bounding box and time range construction
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("Invalid bounding box: {0}")]
    InvalidBbox(String),

    #[error("Invalid time range: {0}")]
    InvalidTimeRange(String),
}

/// Result type alias for SAR-Sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for geometry operations
pub type GeoResult<T> = std::result::Result<T, GeoError>;

// Re-export commonly used types
pub use catalog::{CatalogClient, ItemStream, StacItem};
pub use config::Config;
pub use geo::{BoundingBox, TimeRange};
pub use runner::{BatchOptions, BatchRunner, ProcessingTask, TaskOutcome};
