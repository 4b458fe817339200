//! Command-line front end
//!
//! This module contains all CLI-related functionality including:
//! - Argument parsing structures
//! - Progress display
//! - Rendering of the final report

pub mod args;
pub mod progress;
pub mod render;
pub mod runner;

// Re-export the main CLI structures for convenience
pub use args::Cli;
pub use progress::ProgressObserver;
pub use render::{render_bar_chart, render_report};
pub use runner::{execute, resolve_config};
