//! Shared value types for the pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// URL naming where a text is fetched from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Source(String);

impl Source {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Source {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for Source {
    fn from(url: String) -> Self {
        Self(url)
    }
}

/// Unmodified body of a successful fetch
pub type RawText = String;
