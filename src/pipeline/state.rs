//! Per-source processing state machine
//!
//! ```text
//! Pending -> Fetching -> Normalizing -> Chunking -> Counting -> Reduced -> Done
//!                 |            |             |           |
//!                 +------------+-------------+-----------+-> Failed -> Done
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceState {
    Pending,
    Fetching,
    Normalizing,
    Chunking,
    Counting,
    Reduced,
    Failed,
    Done,
}

impl SourceState {
    /// Whether moving from `self` to `next` is a legal step
    pub fn can_transition_to(self, next: SourceState) -> bool {
        use SourceState::*;
        matches!(
            (self, next),
            (Pending, Fetching)
                | (Fetching, Normalizing)
                | (Fetching, Failed)
                | (Normalizing, Chunking)
                | (Normalizing, Failed)
                | (Chunking, Failed)
                | (Chunking, Counting)
                // empty text skips counting
                | (Chunking, Reduced)
                | (Counting, Reduced)
                | (Counting, Failed)
                | (Reduced, Done)
                | (Failed, Done)
        )
    }

    pub fn is_terminal(self) -> bool {
        self == SourceState::Done
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::Normalizing => "normalizing",
            Self::Chunking => "chunking",
            Self::Counting => "counting",
            Self::Reduced => "reduced",
            Self::Failed => "failed",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for SourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
