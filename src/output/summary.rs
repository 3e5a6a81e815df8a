//! Aggregate batch statistics

use crate::runner::TaskOutcome;
use indexmap::IndexMap;

/// Aggregate statistics over one batch run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    /// Number of tasks executed
    pub total_tasks: usize,

    /// Tasks that ran to completion
    pub succeeded: usize,

    /// Tasks recorded with a failure message
    pub failed: usize,

    /// Catalog items found across all completed tasks
    pub total_items: usize,
}

impl BatchSummary {
    /// Builds a summary from a batch result mapping
    pub fn from_results(results: &IndexMap<String, TaskOutcome>) -> Self {
        let mut summary = Self {
            total_tasks: results.len(),
            ..Self::default()
        };

        for outcome in results.values() {
            match outcome.report() {
                Some(report) => {
                    summary.succeeded += 1;
                    summary.total_items += report.num_items;
                }
                None => summary.failed += 1,
            }
        }

        summary
    }

    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_tasks == 0 {
            return 0.0;
        }
        (self.succeeded as f64 / self.total_tasks as f64) * 100.0
    }
}

/// Prints batch results to stdout in a formatted manner
///
/// # Arguments
///
/// * `results` - The batch result mapping, in task order
pub fn print_summary(results: &IndexMap<String, TaskOutcome>) {
    let summary = BatchSummary::from_results(results);

    println!("=== Batch Summary ===\n");

    println!("Tasks:");
    for (name, outcome) in results {
        match outcome.report() {
            Some(report) => {
                let shape = report
                    .shape
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("  {} — {} items, shape {}", name, report.num_items, shape);
            }
            None => {
                println!(
                    "  {} — FAILED: {}",
                    name,
                    outcome.error_message().unwrap_or("unknown error")
                );
            }
        }
    }
    println!();

    println!("Overview:");
    println!("  Total tasks: {}", summary.total_tasks);
    println!("  Succeeded: {}", summary.succeeded);
    println!("  Failed: {}", summary.failed);
    println!("  Total items found: {}", summary.total_items);
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} tasks completed)",
        summary.success_rate(),
        summary.succeeded,
        summary.total_tasks
    );
}
