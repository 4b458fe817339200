//! Observer that records every event for later assertions

use crate::pipeline::{FailureKind, PipelineObserver, SourceFailure, SourceState, SourceSummary};
use crate::types::Source;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedEvent {
    RunStarted { total: usize },
    Transition { url: String, state: SourceState },
    Retry { url: String, attempt: u32 },
    Failure { url: String, kind: FailureKind },
    SourceFinished { url: String, success: bool },
    RunFinished { succeeded: usize, failed: usize },
}

#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ObservedEvent>>,
}

impl RecordingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// States `url` went through, in order
    pub fn states_of(&self, url: &str) -> Vec<SourceState> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ObservedEvent::Transition { url: u, state } if u == url => Some(state),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: ObservedEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl PipelineObserver for RecordingObserver {
    fn on_run_started(&self, total: usize) {
        self.record(ObservedEvent::RunStarted { total });
    }

    fn on_transition(&self, source: &Source, state: SourceState) {
        self.record(ObservedEvent::Transition {
            url: source.to_string(),
            state,
        });
    }

    fn on_retry(&self, source: &Source, attempt: u32, _reason: &str) {
        self.record(ObservedEvent::Retry {
            url: source.to_string(),
            attempt,
        });
    }

    fn on_failure(&self, failure: &SourceFailure) {
        self.record(ObservedEvent::Failure {
            url: failure.url.to_string(),
            kind: failure.kind,
        });
    }

    fn on_source_finished(&self, summary: &SourceSummary) {
        self.record(ObservedEvent::SourceFinished {
            url: summary.url.to_string(),
            success: summary.is_success(),
        });
    }

    fn on_run_finished(&self, succeeded: usize, failed: usize) {
        self.record(ObservedEvent::RunFinished { succeeded, failed });
    }
}
