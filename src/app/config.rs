//! Application configuration
//!
//! Settings of the binary itself, as opposed to the pipeline.

use clap::ValueEnum;

/// How the final report is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Bar chart of the top words plus a failure summary
    #[default]
    Text,
    /// The full run report as JSON
    Json,
}

/// Application configuration structure
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// Report format
    pub format: OutputFormat,
    /// Show a progress bar while sources are processed
    pub show_progress: bool,
}

impl AppConfig {
    pub fn new(verbose: u8) -> Self {
        Self {
            verbose,
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    /// Get the log filter string based on verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            2 => "trace",
            _ => "trace,hyper=debug,reqwest=debug",
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            verbose: 0,
            format: OutputFormat::Text,
            show_progress: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_follows_verbosity() {
        assert_eq!(AppConfig::new(0).log_level(), "info");
        assert_eq!(AppConfig::new(1).log_level(), "debug");
        assert_eq!(AppConfig::new(2).log_level(), "trace");
        assert!(AppConfig::new(5).log_level().contains("hyper=debug"));
    }

    #[test]
    fn test_builders() {
        let config = AppConfig::new(1)
            .with_format(OutputFormat::Json)
            .with_progress(false);

        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.show_progress);
    }
}
