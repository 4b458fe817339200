use thiserror::Error;

/// Errors that stop a pipeline run, or a single source, from producing counts
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error while processing {url}: {reason}")]
    Internal { url: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl PipelineError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn internal(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Internal {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Exit code the binary reports for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput(_) | Self::Config(_) | Self::Toml(_) => 2,
            Self::Internal { .. } | Self::Io(_) | Self::Client(_) => 1,
        }
    }

    /// Short message suitable for the terminal
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(msg) => format!("Invalid input: {msg}"),
            Self::Config(msg) => format!("Configuration problem: {msg}"),
            Self::Toml(e) => format!("Could not parse configuration file: {e}"),
            other => format!("Error: {other}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
