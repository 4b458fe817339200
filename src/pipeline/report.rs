//! Outcome of a pipeline run

use crate::count::FrequencyTable;
use crate::fetch::FetchError;
use crate::types::Source;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Category of a source failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The fetch failed; the source contributed nothing
    Fetch,
    /// A counting task died; the source's partial counts were discarded
    Internal,
}

/// A source that did not contribute to the result, and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFailure {
    pub url: Source,
    pub kind: FailureKind,
    pub reason: String,
    /// Fetch attempts made, retries included
    pub attempts: u32,
}

impl SourceFailure {
    pub fn fetch(error: &FetchError, attempts: u32) -> Self {
        Self {
            url: error.url.clone(),
            kind: FailureKind::Fetch,
            reason: error.cause.to_string(),
            attempts,
        }
    }

    pub fn internal(url: &Source, reason: impl Into<String>) -> Self {
        Self {
            url: url.clone(),
            kind: FailureKind::Internal,
            reason: reason.into(),
            attempts: 1,
        }
    }
}

/// Counters for one source that was processed to the end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStats {
    pub raw_bytes: usize,
    pub normalized_bytes: usize,
    pub chunks: usize,
    pub tokens: u64,
    pub distinct_words: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceOutcome {
    Completed(SourceStats),
    Failed(SourceFailure),
}

/// What happened to one source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSummary {
    pub url: Source,
    pub outcome: SourceOutcome,
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
}

impl SourceSummary {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, SourceOutcome::Completed(_))
    }
}

/// Global frequency table plus per-source bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub result: FrequencyTable,
    /// One entry per requested source, in request order
    pub sources: Vec<SourceSummary>,
    pub top_k: usize,
    #[serde(with = "humantime_serde")]
    pub elapsed: Duration,
}

impl RunReport {
    /// The configured number of most frequent words
    pub fn top_words(&self) -> Vec<(String, u64)> {
        self.result.top_k(self.top_k)
    }

    /// Sources that contributed nothing, in request order
    pub fn failures(&self) -> Vec<&SourceFailure> {
        self.sources
            .iter()
            .filter_map(|s| match &s.outcome {
                SourceOutcome::Failed(failure) => Some(failure),
                SourceOutcome::Completed(_) => None,
            })
            .collect()
    }

    pub fn succeeded(&self) -> usize {
        self.sources.iter().filter(|s| s.is_success()).count()
    }

    pub fn has_internal_failures(&self) -> bool {
        self.failures()
            .iter()
            .any(|f| f.kind == FailureKind::Internal)
    }
}
