//! End-to-end execution of a command line

use super::args::Cli;
use super::progress::ProgressObserver;
use super::render::{render_report, DEFAULT_BAR_WIDTH};
use crate::app::{AppConfig, OutputFormat};
use crate::config::PipelineConfig;
use crate::fetch::ReqwestClient;
use crate::pipeline::{Coordinator, PipelineObserver, TracingObserver};
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::debug;

/// Exit code when some source's counting died
pub const INTERNAL_FAILURE: i32 = 1;

/// Resolve the pipeline configuration for `cli`
///
/// Defaults, then the TOML file given with `--config`, then `WORDFREQ_*`
/// environment variables, then command-line flags.
pub async fn resolve_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::load(path)
            .await
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    config.merge_env_vars()?;
    cli.apply_overrides(&mut config);
    debug!("Resolved pipeline configuration: {:?}", config);
    Ok(config)
}

/// Run the pipeline for `cli` and print the report
///
/// Returns the process exit code: zero unless a source failed internally.
pub async fn execute(cli: Cli, app: &AppConfig) -> Result<i32> {
    let config = resolve_config(&cli).await?;
    config.validate()?;

    let client = ReqwestClient::new(config.fetch_timeout)?;
    let observer: Arc<dyn PipelineObserver> =
        if app.show_progress && app.format == OutputFormat::Text && std::io::stderr().is_terminal()
        {
            Arc::new(ProgressObserver::new())
        } else {
            Arc::new(TracingObserver)
        };

    let coordinator = Coordinator::new(client, config).with_observer(observer);
    let report = coordinator.run(cli.urls.iter().map(String::as_str)).await?;

    match app.format {
        OutputFormat::Text => print!("{}", render_report(&cli.title, &report, DEFAULT_BAR_WIDTH)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        ),
    }

    if report.has_internal_failures() {
        Ok(INTERNAL_FAILURE)
    } else {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use clap::Parser;
    use std::io::Write;

    #[tokio::test]
    async fn test_resolve_config_from_file_and_flags() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "chunk_count = 7\ntop_k = 3").unwrap();
        let path = file.path().to_string_lossy().to_string();
        let cli = Cli::try_parse_from(["wordfreq", "-c", &path, "-k", "5", "http://a/"]).unwrap();

        let config = resolve_config(&cli).await.unwrap();

        assert_eq!(config.chunk_count, 7);
        assert_eq!(config.top_k, 5);
    }

    #[tokio::test]
    async fn test_missing_config_file_is_error() {
        let cli = Cli::try_parse_from([
            "wordfreq",
            "-c",
            "/definitely/not/here/wordfreq.toml",
            "http://a/",
        ])
        .unwrap();

        let err = resolve_config(&cli).await.unwrap_err();

        assert!(err.to_string().contains("Failed to load configuration"));
    }

    #[tokio::test]
    async fn test_execute_rejects_zero_chunks() {
        let cli = Cli::try_parse_from(["wordfreq", "-n", "0", "http://a/"]).unwrap();
        let app = cli.app_config();

        let err = execute(cli, &app).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::InvalidInput(_))
        ));
    }
}
