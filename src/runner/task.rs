//! Task descriptors and result records

use crate::analysis::SpatialStats;
use crate::geo::{BoundingBox, TimeRange};
use chrono::{DateTime, Utc};
use std::fmt;

/// One named unit of batch work: a region and a time window
///
/// Descriptors are immutable once constructed. The bounding box and time
/// range are validated value types, so a task that exists is well-formed;
/// name uniqueness is the caller's concern (the config layer rejects
/// duplicates eagerly).
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingTask {
    name: String,
    bbox: BoundingBox,
    range: TimeRange,
}

impl ProcessingTask {
    /// Creates a task descriptor
    pub fn new(name: impl Into<String>, bbox: BoundingBox, range: TimeRange) -> Self {
        Self {
            name: name.into(),
            bbox,
            range,
        }
    }

    /// Task name, the key its result is stored under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Geographic search area
    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// Acquisition time window
    pub fn range(&self) -> &TimeRange {
        &self.range
    }
}

impl fmt::Display for ProcessingTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bbox={} datetime={}", self.name, self.bbox, self.range)
    }
}

/// Shape of a loaded scene stack as (time, height, width)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackShape {
    pub times: usize,
    pub height: usize,
    pub width: usize,
}

impl fmt::Display for StackShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.times, self.height, self.width)
    }
}

/// Scalar summaries of the per-pixel temporal statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemporalSummary {
    /// Spatial summary of the temporal mean map
    pub mean: SpatialStats,

    /// Spatial summary of the temporal standard deviation map
    pub deviation: SpatialStats,
}

/// Scalar summary of a change map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeSummary {
    /// Spatial summary of the change map in dB
    pub stats: SpatialStats,

    /// Acquisition time of the reference scene
    pub before: DateTime<Utc>,

    /// Acquisition time of the target scene
    pub after: DateTime<Utc>,
}

/// Success payload of one task
#[derive(Debug, Clone, PartialEq)]
pub struct TaskReport {
    /// Number of catalog items the search produced
    pub num_items: usize,

    /// Shape of the loaded scene stack; `None` when no loader is installed
    pub shape: Option<StackShape>,

    /// Temporal statistics summary, when requested and computable
    pub stats: Option<TemporalSummary>,

    /// Change detection summary, when requested and computable
    pub change: Option<ChangeSummary>,
}

/// Result record of one task: success payload or failure message
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    /// The task ran to completion
    Completed(TaskReport),

    /// The task failed; the run continued with the next task
    Failed { message: String },
}

impl TaskOutcome {
    /// True for completed tasks
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Completed(_))
    }

    /// The success payload, if any
    pub fn report(&self) -> Option<&TaskReport> {
        match self {
            TaskOutcome::Completed(report) => Some(report),
            TaskOutcome::Failed { .. } => None,
        }
    }

    /// The failure message, if any
    pub fn error_message(&self) -> Option<&str> {
        match self {
            TaskOutcome::Completed(_) => None,
            TaskOutcome::Failed { message } => Some(message),
        }
    }
}
