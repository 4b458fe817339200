//! Concurrent map-reduce pipeline
//!
//! Per source: fetch, normalize, chunk, count chunks in parallel, reduce.
//! Across sources: reduce the per-source tables into one result. A source
//! that fails only loses its own contribution.

pub mod coordinator;
pub mod observer;
pub mod report;
pub mod retry;
pub mod state;

pub use coordinator::Coordinator;
pub use observer::{PipelineObserver, TracingObserver};
pub use report::{
    FailureKind, RunReport, SourceFailure, SourceOutcome, SourceStats, SourceSummary,
};
pub use retry::fetch_with_retry;
pub use state::SourceState;
