//! # wordfreq
//!
//! Fetches text from one or more URLs and counts word frequencies with a
//! concurrent map-reduce pipeline.
//!
//! ## Usage
//!
//! ```bash
//! wordfreq [-n chunks] [-k top] [--format text|json] <URL>...
//! ```
//!
//! ## Modules
//!
//! - `app` - Logging setup, application configuration and fatal error handling
//! - `cli` - Command-line arguments, progress display and result rendering
//! - `config` - Pipeline configuration from defaults, TOML and environment
//! - `count` - Word counting (map) and frequency table merging (reduce)
//! - `fetch` - HTTP retrieval behind a substitutable client trait
//! - `pipeline` - Coordinator driving every source through the stages
//! - `text` - Normalization and chunking of fetched text
//! - `testing` - Mock HTTP client and recording observer for tests
pub mod app;
pub mod cli;
pub mod config;
pub mod count;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod text;
pub mod types;

pub mod testing;


pub use config::PipelineConfig;
pub use count::FrequencyTable;
pub use error::{PipelineError, Result};
pub use pipeline::{Coordinator, RunReport};
pub use types::Source;
