//! CLI argument structures

use crate::app::{AppConfig, OutputFormat};
use crate::config::PipelineConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Default title printed above the chart
pub const DEFAULT_TITLE: &str = "Top words across all URLs";

/// Count word frequencies across texts fetched from URLs
#[derive(Parser, Debug)]
#[command(name = "wordfreq")]
#[command(about = "wordfreq - Count word frequencies across texts fetched from URLs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// URLs to fetch and analyze
    #[arg(required = true, value_name = "URL")]
    pub urls: Vec<String>,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of chunks each text is split into for parallel counting
    #[arg(short = 'n', long)]
    pub chunks: Option<usize>,

    /// Number of parallel counting workers (defaults to available cores)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Maximum number of fetches in flight
    #[arg(long, value_name = "N")]
    pub max_fetches: Option<usize>,

    /// Timeout for a single fetch, in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Retries of transient fetch failures
    #[arg(long)]
    pub retries: Option<u32>,

    /// Number of top words to report
    #[arg(short = 'k', long)]
    pub top: Option<usize>,

    /// Title shown above the chart
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Do not show a progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl Cli {
    pub fn app_config(&self) -> AppConfig {
        AppConfig::new(self.verbose)
            .with_format(self.format)
            .with_progress(!self.no_progress)
    }

    /// Layer command-line flags over `config`
    pub fn apply_overrides(&self, config: &mut PipelineConfig) {
        if let Some(chunks) = self.chunks {
            config.chunk_count = chunks;
        }
        if let Some(workers) = self.workers {
            config.counting_workers = Some(workers);
        }
        if let Some(max) = self.max_fetches {
            config.max_concurrent_fetches = Some(max);
        }
        if let Some(secs) = self.timeout_secs {
            config.fetch_timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = self.retries {
            config.retry.max_retries = retries;
        }
        if let Some(top) = self.top {
            config.top_k = top;
        }
    }
}
