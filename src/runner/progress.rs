//! Injectable progress reporting
//!
//! The runner never talks to a terminal directly; it drives whatever sink
//! was injected, and only when progress display is enabled. A no-op sink is
//! substitutable with zero behavioral difference.

use indicatif::{ProgressBar, ProgressStyle};

/// Receiver for batch progress events
///
/// The runner calls `start` once before the first task, `describe` before
/// each task begins, `advance` after each task completes (success or
/// failure), and `finish` once after the last task.
pub trait ProgressSink: Send + Sync {
    /// Announces the total number of tasks in the run
    fn start(&self, total: usize);

    /// Announces the task about to start
    fn describe(&self, name: &str);

    /// Marks one task as completed
    fn advance(&self);

    /// Marks the run as finished
    fn finish(&self);
}

/// Progress sink that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn start(&self, _total: usize) {}
    fn describe(&self, _name: &str) {}
    fn advance(&self) {}
    fn finish(&self) {}
}

/// Terminal progress bar backed by `indicatif`
pub struct IndicatifProgress {
    bar: ProgressBar,
}

impl IndicatifProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template("{msg:24} [{wide_bar}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { bar }
    }
}

impl Default for IndicatifProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for IndicatifProgress {
    fn start(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
    }

    fn describe(&self, name: &str) {
        self.bar.set_message(name.to_string());
    }

    fn advance(&self) {
        self.bar.inc(1);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_sink_is_callable() {
        let sink = NoopProgress;
        sink.start(3);
        sink.describe("task");
        sink.advance();
        sink.finish();
    }

    #[test]
    fn test_indicatif_sink_tracks_position() {
        let progress = IndicatifProgress::new();
        progress.start(2);
        progress.describe("first");
        progress.advance();
        assert_eq!(progress.bar.position(), 1);
        progress.advance();
        progress.finish();
        assert_eq!(progress.bar.position(), 2);
    }
}
