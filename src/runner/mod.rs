//! Batch task runner
//!
//! This module drives ordered lists of named search tasks through the
//! catalog client, including:
//! - Task descriptors and per-task result records
//! - Sequential execution with per-task failure isolation
//! - Optional statistics and change-detection steps
//! - Injectable progress reporting

mod batch;
mod progress;
mod task;

pub use batch::{BatchOptions, BatchRunner};
pub use progress::{IndicatifProgress, NoopProgress, ProgressSink};
pub use task::{ChangeSummary, ProcessingTask, StackShape, TaskOutcome, TaskReport, TemporalSummary};
