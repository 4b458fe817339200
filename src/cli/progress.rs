//! Progress bar over the sources of a run

use crate::pipeline::{
    PipelineObserver, SourceFailure, SourceState, SourceSummary, TracingObserver,
};
use crate::types::Source;
use indicatif::{ProgressBar, ProgressStyle};

/// Observer that drives a progress bar and forwards everything to tracing
pub struct ProgressObserver {
    bar: ProgressBar,
    inner: TracingObserver,
}

impl ProgressObserver {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("█▓▒░ "));
        }
        Self {
            bar,
            inner: TracingObserver,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineObserver for ProgressObserver {
    fn on_run_started(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_message("fetching");
        self.inner.on_run_started(total);
    }

    fn on_transition(&self, source: &Source, state: SourceState) {
        self.inner.on_transition(source, state);
    }

    fn on_retry(&self, source: &Source, attempt: u32, reason: &str) {
        self.bar.set_message(format!("retrying {source}"));
        self.inner.on_retry(source, attempt, reason);
    }

    fn on_failure(&self, failure: &SourceFailure) {
        self.bar.suspend(|| self.inner.on_failure(failure));
    }

    fn on_source_finished(&self, summary: &SourceSummary) {
        self.bar.inc(1);
        self.bar.set_message(summary.url.to_string());
        self.inner.on_source_finished(summary);
    }

    fn on_run_finished(&self, succeeded: usize, failed: usize) {
        self.bar.finish_and_clear();
        self.inner.on_run_finished(succeeded, failed);
    }
}
