//! Progress and failure reporting hooks
//!
//! The coordinator never writes to a global sink on its own; it reports
//! through a `PipelineObserver`. The default one turns events into tracing
//! records, the CLI adds a progress bar, and tests record what they see.

use super::report::{FailureKind, SourceFailure, SourceSummary};
use super::state::SourceState;
use crate::types::Source;
use tracing::{debug, error, info, warn};

pub trait PipelineObserver: Send + Sync {
    /// A run over `total` sources is starting
    fn on_run_started(&self, _total: usize) {}

    /// `source` moved to `state`
    fn on_transition(&self, _source: &Source, _state: SourceState) {}

    /// A fetch attempt failed and will be retried after `attempt`
    fn on_retry(&self, _source: &Source, _attempt: u32, _reason: &str) {}

    /// `source` will contribute nothing to the result
    fn on_failure(&self, _failure: &SourceFailure) {}

    /// `source` reached `Done`
    fn on_source_finished(&self, _summary: &SourceSummary) {}

    /// Every source is done and the result is reduced
    fn on_run_finished(&self, _succeeded: usize, _failed: usize) {}
}

/// Observer that emits tracing events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_run_started(&self, total: usize) {
        info!("Processing {} source(s)", total);
    }

    fn on_transition(&self, source: &Source, state: SourceState) {
        debug!("{} -> {}", source, state);
    }

    fn on_retry(&self, source: &Source, attempt: u32, reason: &str) {
        warn!("Retrying {} (attempt {}): {}", source, attempt, reason);
    }

    fn on_failure(&self, failure: &SourceFailure) {
        match failure.kind {
            FailureKind::Fetch => {
                warn!("Skipping {}: {}", failure.url, failure.reason)
            }
            FailureKind::Internal => {
                error!("Processing {} aborted: {}", failure.url, failure.reason)
            }
        }
    }

    fn on_source_finished(&self, summary: &SourceSummary) {
        info!("Finished {} in {:?}", summary.url, summary.duration);
    }

    fn on_run_finished(&self, succeeded: usize, failed: usize) {
        info!("Run completed: {} succeeded, {} failed", succeeded, failed);
    }
}
