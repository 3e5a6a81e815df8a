//! Statistical analysis and change detection for SAR backscatter
//!
//! Pure numeric kernels over scene stacks: temporal and spatial summary
//! statistics, percentiles, and log-ratio change detection. Everything here
//! is deterministic and NaN-aware (missing samples are skipped, not
//! propagated).

mod change;
mod statistics;

pub use change::{log_ratio, temporal_change, to_db, ChangeMap, DEFAULT_EPSILON};
pub use statistics::{percentiles, spatial_stats, temporal_stats, Percentile, SpatialStats, TemporalStats};

use thiserror::Error;

/// Errors from analysis computations
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Scene stack is empty")]
    EmptyStack,

    #[error("No finite samples to summarize")]
    NoSamples,

    #[error("Invalid percentile {0}: must be within 0..=100")]
    InvalidPercentile(f64),

    #[error("Raster length mismatch: before has {before} samples, after has {after}")]
    LengthMismatch { before: usize, after: usize },
}

/// Result type for analysis operations
pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
