//! Error handling utilities
//!
//! This module provides centralized handling of errors that end the process.

use crate::error::PipelineError;
use tracing::error;

/// Exit code for argument and configuration problems
pub const ARGUMENT_ERROR: i32 = 2;
/// Exit code for everything else
pub const GENERAL_ERROR: i32 = 1;

/// Exit code for an error reaching the top of `main`
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<PipelineError>())
        .map(PipelineError::exit_code)
        .unwrap_or(GENERAL_ERROR)
}

/// Handle fatal errors and exit with appropriate status code
///
/// - `verbose = 0`: user-friendly message only
/// - `verbose >= 1`: the full error chain as well
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {}", error);

    match error
        .chain()
        .find_map(|cause| cause.downcast_ref::<PipelineError>())
    {
        Some(pipeline_err) => eprintln!("{}", pipeline_err.user_message()),
        None => eprintln!("Error: {error}"),
    }

    if verbose >= 1 {
        eprintln!("\nError chain:");
        for (i, cause) in error.chain().enumerate() {
            eprintln!("  {}: {}", i, cause);
        }
    }

    std::process::exit(exit_code_for(&error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_for_invalid_input() {
        let err = anyhow::Error::new(PipelineError::invalid_input("no sources"));

        assert_eq!(exit_code_for(&err), ARGUMENT_ERROR);
    }

    #[test]
    fn test_exit_code_looks_through_context() {
        let err = Err::<(), _>(PipelineError::Config("bad value".into()))
            .context("Failed to load configuration")
            .unwrap_err();

        assert_eq!(exit_code_for(&err), ARGUMENT_ERROR);
    }

    #[test]
    fn test_exit_code_for_other_errors() {
        let err = anyhow::anyhow!("something else");

        assert_eq!(exit_code_for(&err), GENERAL_ERROR);
    }
}
