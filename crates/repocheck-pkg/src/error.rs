//! Error types for repocheck-pkg

use repocheck_exec::ExecError;
use thiserror::Error;

/// Errors that can occur during backend queries
#[derive(Error, Debug, Clone)]
pub enum PackageError {
    /// The query tool could not be run to completion
    #[error("execution error: {0}")]
    ExecutionError(#[from] ExecError),

    /// A package or repository name cannot be passed to the shell safely
    #[error("invalid argument for {tool}: {value:?}")]
    InvalidArgument {
        /// Tool the argument was meant for
        tool: &'static str,
        /// Offending value
        value: String,
    },
}

impl PackageError {
    /// Whether the query might answer if run again, i.e. it timed out
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, PackageError::ExecutionError(e) if e.is_retryable())
    }
}
