//! Pipeline configuration
//!
//! Values come from defaults, an optional TOML file and `WORDFREQ_*`
//! environment variables, in increasing order of precedence. The CLI layers
//! its own flags on top.

use crate::error::{PipelineError, Result};
use crate::fetch::DEFAULT_FETCH_TIMEOUT;
use crate::text::DEFAULT_CHUNK_COUNT;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Default number of words reported as the top of the table
pub const DEFAULT_TOP_K: usize = 10;

/// Prefix of environment variables read by [`PipelineConfig::merge_env_vars`]
pub const ENV_PREFIX: &str = "WORDFREQ_";

/// Settings consumed by the coordinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Chunks each source's text is split into
    pub chunk_count: usize,

    /// Parallel counting workers; `None` sizes the pool to the available cores
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counting_workers: Option<usize>,

    /// Upper bound on fetches in flight; `None` fetches every source at once
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrent_fetches: Option<usize>,

    /// Timeout for a single fetch attempt
    #[serde(with = "humantime_serde")]
    pub fetch_timeout: Duration,

    /// Retry policy wrapped around each fetch
    pub retry: RetryPolicy,

    /// Number of words reported by `RunReport::top_words`
    pub top_k: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_count: DEFAULT_CHUNK_COUNT,
            counting_workers: None,
            max_concurrent_fetches: None,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            retry: RetryPolicy::default(),
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Retries of transient fetch failures with exponential backoff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Attempts after the first one
    pub max_retries: u32,

    /// Delay before the first retry, doubled on every further one
    #[serde(with = "humantime_serde")]
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (1-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.initial_delay.saturating_mul(2u32.pow(exponent))
    }
}

impl PipelineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read a TOML configuration file
    pub async fn load(path: &Path) -> Result<Self> {
        debug!("Loading pipeline configuration from {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&content)
    }

    /// Apply `WORDFREQ_*` variables from the process environment
    pub fn merge_env_vars(&mut self) -> Result<()> {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    /// Apply `WORDFREQ_*` variables looked up through `lookup`
    pub fn merge_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(v) = var("CHUNK_COUNT") {
            self.chunk_count = parse_env("CHUNK_COUNT", &v)?;
        }
        if let Some(v) = var("COUNTING_WORKERS") {
            self.counting_workers = Some(parse_env("COUNTING_WORKERS", &v)?);
        }
        if let Some(v) = var("MAX_CONCURRENT_FETCHES") {
            self.max_concurrent_fetches = Some(parse_env("MAX_CONCURRENT_FETCHES", &v)?);
        }
        if let Some(v) = var("FETCH_TIMEOUT") {
            self.fetch_timeout = humantime_serde::re::humantime::parse_duration(&v).map_err(|e| {
                PipelineError::Config(format!("{ENV_PREFIX}FETCH_TIMEOUT `{v}`: {e}"))
            })?;
        }
        if let Some(v) = var("MAX_RETRIES") {
            self.retry.max_retries = parse_env("MAX_RETRIES", &v)?;
        }
        if let Some(v) = var("TOP_K") {
            self.top_k = parse_env("TOP_K", &v)?;
        }
        Ok(())
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.chunk_count < 1 {
            return Err(PipelineError::invalid_input(
                "chunk count must be at least 1",
            ));
        }
        if self.counting_workers == Some(0) {
            return Err(PipelineError::invalid_input(
                "counting workers must be at least 1",
            ));
        }
        if self.max_concurrent_fetches == Some(0) {
            return Err(PipelineError::invalid_input(
                "max concurrent fetches must be at least 1",
            ));
        }
        if self.fetch_timeout.is_zero() {
            return Err(PipelineError::invalid_input(
                "fetch timeout must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Size of the counting pool
    pub fn effective_workers(&self) -> usize {
        self.counting_workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| PipelineError::Config(format!("{ENV_PREFIX}{name} `{value}`: {e}")))
}
