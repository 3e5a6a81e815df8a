//! Markdown report generation
//!
//! This module generates human-readable markdown reports of batch results,
//! including per-task outcomes, statistics summaries, and failures.

use crate::output::summary::BatchSummary;
use crate::output::OutputResult;
use crate::runner::TaskOutcome;
use indexmap::IndexMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Generates a markdown report from batch results
///
/// # Arguments
///
/// * `results` - The batch result mapping, in task order
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to write the report
pub fn generate_markdown_report(
    results: &IndexMap<String, TaskOutcome>,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_report(results);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats batch results as markdown
pub fn format_markdown_report(results: &IndexMap<String, TaskOutcome>) -> String {
    let summary = BatchSummary::from_results(results);
    let mut md = String::new();

    // Title
    md.push_str("# SAR-Sweep Batch Report\n\n");

    // Overall statistics
    md.push_str("## Overview\n\n");
    md.push_str(&format!("- **Total Tasks**: {}\n", summary.total_tasks));
    md.push_str(&format!("- **Succeeded**: {}\n", summary.succeeded));
    md.push_str(&format!("- **Failed**: {}\n", summary.failed));
    md.push_str(&format!("- **Total Items**: {}\n", summary.total_items));
    md.push_str(&format!(
        "- **Success Rate**: {:.1}%\n\n",
        summary.success_rate()
    ));

    // Per-task table
    md.push_str("## Tasks\n\n");
    md.push_str("| Task | Status | Items | Stack Shape |\n");
    md.push_str("|------|--------|-------|-------------|\n");
    for (name, outcome) in results {
        match outcome.report() {
            Some(report) => {
                let shape = report
                    .shape
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string());
                md.push_str(&format!(
                    "| {} | ok | {} | {} |\n",
                    name, report.num_items, shape
                ));
            }
            None => {
                md.push_str(&format!("| {} | failed | - | - |\n", name));
            }
        }
    }
    md.push('\n');

    // Statistics per task
    let with_stats: Vec<_> = results
        .iter()
        .filter_map(|(name, outcome)| {
            outcome
                .report()
                .and_then(|r| r.stats.map(|s| (name, r, s)))
        })
        .collect();

    if !with_stats.is_empty() {
        md.push_str("## Statistics\n\n");
        md.push_str("| Task | Mean (min/max/mean) | Std (min/max/mean) |\n");
        md.push_str("|------|---------------------|--------------------|\n");
        for (name, _, stats) in &with_stats {
            md.push_str(&format!(
                "| {} | {:.3} / {:.3} / {:.3} | {:.3} / {:.3} / {:.3} |\n",
                name,
                stats.mean.min,
                stats.mean.max,
                stats.mean.mean,
                stats.deviation.min,
                stats.deviation.max,
                stats.deviation.mean
            ));
        }
        md.push('\n');
    }

    // Change detection per task
    let with_change: Vec<_> = results
        .iter()
        .filter_map(|(name, outcome)| outcome.report().and_then(|r| r.change.map(|c| (name, c))))
        .collect();

    if !with_change.is_empty() {
        md.push_str("## Change Detection\n\n");
        md.push_str("| Task | Window | Change dB (min/max/mean) |\n");
        md.push_str("|------|--------|--------------------------|\n");
        for (name, change) in &with_change {
            md.push_str(&format!(
                "| {} | {} → {} | {:.3} / {:.3} / {:.3} |\n",
                name,
                change.before.format("%Y-%m-%d"),
                change.after.format("%Y-%m-%d"),
                change.stats.min,
                change.stats.max,
                change.stats.mean
            ));
        }
        md.push('\n');
    }

    // Failures
    let failures: Vec<_> = results
        .iter()
        .filter_map(|(name, outcome)| outcome.error_message().map(|m| (name, m)))
        .collect();

    if !failures.is_empty() {
        md.push_str("## Failures\n\n");
        for (name, message) in &failures {
            md.push_str(&format!("- **{}**: {}\n", name, message));
        }
        md.push('\n');
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{StackShape, TaskReport};
    use tempfile::tempdir;

    fn sample_results() -> IndexMap<String, TaskOutcome> {
        let mut results = IndexMap::new();
        results.insert(
            "Berlin_Jan".to_string(),
            TaskOutcome::Completed(TaskReport {
                num_items: 4,
                shape: Some(StackShape {
                    times: 4,
                    height: 2,
                    width: 2,
                }),
                stats: None,
                change: None,
            }),
        );
        results.insert(
            "Hamburg".to_string(),
            TaskOutcome::Failed {
                message: "Catalog API returned HTTP 500".to_string(),
            },
        );
        results
    }

    #[test]
    fn test_format_contains_tasks_and_failures() {
        let md = format_markdown_report(&sample_results());

        assert!(md.contains("# SAR-Sweep Batch Report"));
        assert!(md.contains("| Berlin_Jan | ok | 4 | (4, 2, 2) |"));
        assert!(md.contains("| Hamburg | failed | - | - |"));
        assert!(md.contains("- **Hamburg**: Catalog API returned HTTP 500"));
    }

    #[test]
    fn test_format_skips_empty_sections() {
        let mut results = IndexMap::new();
        results.insert(
            "only".to_string(),
            TaskOutcome::Completed(TaskReport {
                num_items: 1,
                shape: None,
                stats: None,
                change: None,
            }),
        );

        let md = format_markdown_report(&results);
        assert!(!md.contains("## Failures"));
        assert!(!md.contains("## Statistics"));
        assert!(!md.contains("## Change Detection"));
    }

    #[test]
    fn test_generate_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.md");

        generate_markdown_report(&sample_results(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Berlin_Jan"));
    }
}
