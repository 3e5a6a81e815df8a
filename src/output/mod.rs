//! Result presentation
//!
//! This module turns a batch result mapping into human-facing output: an
//! aggregate summary printed to stdout and a per-task markdown report.

mod report;
mod summary;

pub use report::{format_markdown_report, generate_markdown_report};
pub use summary::{print_summary, BatchSummary};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
