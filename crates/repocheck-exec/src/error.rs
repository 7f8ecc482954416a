//! Error types for repocheck-exec

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while running a query command
#[derive(Error, Debug, Clone)]
pub enum ExecError {
    /// Command timed out
    #[error("command timed out after {timeout:?}")]
    Timeout {
        /// Timeout duration that was exceeded
        timeout: Duration,
    },

    /// Process spawn error
    #[error("failed to spawn process: {0}")]
    SpawnError(String),

    /// I/O error during execution
    #[error("I/O error: {0}")]
    IoError(String),

    /// Command terminated by a signal, so no exit status is available
    #[error("command terminated by signal: {0}")]
    Terminated(String),
}

impl ExecError {
    /// Check if error is retryable
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, ExecError::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_retryable() {
        let err = ExecError::Timeout {
            timeout: Duration::from_secs(1),
        };
        assert!(err.is_retryable());
        assert!(!ExecError::SpawnError("sh".to_string()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = ExecError::IoError("broken pipe".to_string());
        assert_eq!(err.to_string(), "I/O error: broken pipe");
    }
}
