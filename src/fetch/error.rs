use crate::types::Source;
use thiserror::Error;

/// A failed retrieval of one source
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Failed to fetch {url}: {cause}")]
pub struct FetchError {
    pub url: Source,
    #[source]
    pub cause: FetchCause,
}

impl FetchError {
    pub fn new(url: &Source, cause: FetchCause) -> Self {
        Self {
            url: url.clone(),
            cause,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.cause.is_retryable()
    }
}

/// Why a fetch failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchCause {
    #[error("malformed URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported URL scheme `{0}`")]
    UnsupportedScheme(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),
}

impl FetchCause {
    /// Whether trying again could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout | Self::Transport(_) => true,
            Self::Status(code) => matches!(code, 408 | 429 | 500..=599),
            Self::InvalidUrl(_) | Self::UnsupportedScheme(_) => false,
        }
    }
}

impl From<reqwest::Error> for FetchCause {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if let Some(status) = e.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Transport(e.to_string())
        }
    }
}
