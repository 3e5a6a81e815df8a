use crate::runner::{BatchOptions, ProcessingTask};
use crate::{BoundingBox, ConfigError, ConfigResult, TimeRange};
use serde::Deserialize;

/// Main configuration structure for SAR-Sweep
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub runner: RunnerConfig,
    pub output: OutputConfig,
    #[serde(default, rename = "task")]
    pub tasks: Vec<TaskEntry>,
}

impl Config {
    /// Converts the configured task entries into validated descriptors
    pub fn processing_tasks(&self) -> ConfigResult<Vec<ProcessingTask>> {
        self.tasks.iter().map(TaskEntry::to_task).collect()
    }

    /// Builds runner options from the config
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            compute_stats: self.runner.compute_stats,
            compute_change: self.runner.compute_change,
            show_progress: self.runner.show_progress,
            limit: self.catalog.limit,
        }
    }
}

/// Catalog endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the STAC API
    #[serde(rename = "api-url")]
    pub api_url: String,

    /// Collection to search (e.g. "sentinel-1-grd")
    pub collection: String,

    /// Orbit state filter: "ascending" or "descending"
    #[serde(rename = "orbit-state", default = "default_orbit_state")]
    pub orbit_state: String,

    /// SAR instrument mode filter (e.g. "IW")
    #[serde(rename = "instrument-mode", default = "default_instrument_mode")]
    pub instrument_mode: String,

    /// SAS token endpoint for asset signing; items pass through unsigned
    /// when absent
    #[serde(rename = "sign-url", default)]
    pub sign_url: Option<String>,

    /// Default item cap per search
    #[serde(default)]
    pub limit: Option<usize>,
}

fn default_orbit_state() -> String {
    "descending".to_string()
}

fn default_instrument_mode() -> String {
    "IW".to_string()
}

/// Runner behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerConfig {
    /// Compute temporal statistics for loaded stacks
    #[serde(rename = "compute-stats", default = "default_true")]
    pub compute_stats: bool,

    /// Compute change detection for loaded stacks
    #[serde(rename = "compute-change", default = "default_true")]
    pub compute_change: bool,

    /// Show a terminal progress bar while processing
    #[serde(rename = "show-progress", default = "default_true")]
    pub show_progress: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            compute_stats: true,
            compute_change: true,
            show_progress: true,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the markdown report file
    #[serde(rename = "report-path")]
    pub report_path: String,
}

/// One `[[task]]` entry as written in the config file
#[derive(Debug, Clone, Deserialize)]
pub struct TaskEntry {
    /// Unique task name, the key its result is stored under
    pub name: String,

    /// Bounding box as [west, south, east, north]
    pub bbox: [f64; 4],

    /// Time range as "start/end"
    pub datetime: String,
}

impl TaskEntry {
    /// Builds a validated task descriptor from this entry
    pub fn to_task(&self) -> ConfigResult<ProcessingTask> {
        let bbox = BoundingBox::from_array(self.bbox).map_err(|e| ConfigError::InvalidTask {
            name: self.name.clone(),
            message: e.to_string(),
        })?;

        let range = TimeRange::parse(&self.datetime).map_err(|e| ConfigError::InvalidTask {
            name: self.name.clone(),
            message: e.to_string(),
        })?;

        Ok(ProcessingTask::new(self.name.clone(), bbox, range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_entry_to_task() {
        let entry = TaskEntry {
            name: "Berlin_Jan".to_string(),
            bbox: [13.0, 52.0, 14.0, 53.0],
            datetime: "2022-01-01/2022-01-15".to_string(),
        };

        let task = entry.to_task().unwrap();
        assert_eq!(task.name(), "Berlin_Jan");
        assert_eq!(task.bbox().east(), 14.0);
    }

    #[test]
    fn test_task_entry_invalid_bbox() {
        let entry = TaskEntry {
            name: "bad".to_string(),
            bbox: [14.0, 52.0, 13.0, 53.0],
            datetime: "2022-01-01/2022-01-15".to_string(),
        };

        assert!(matches!(
            entry.to_task(),
            Err(ConfigError::InvalidTask { .. })
        ));
    }

    #[test]
    fn test_task_entry_invalid_datetime() {
        let entry = TaskEntry {
            name: "bad".to_string(),
            bbox: [13.0, 52.0, 14.0, 53.0],
            datetime: "2022-02-01/2022-01-01".to_string(),
        };

        assert!(entry.to_task().is_err());
    }
}
