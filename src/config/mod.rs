//! Configuration management

pub mod pipeline;

pub use pipeline::{PipelineConfig, RetryPolicy, DEFAULT_TOP_K, ENV_PREFIX};
