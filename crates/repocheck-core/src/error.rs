//! Core error types for repocheck-core

use thiserror::Error;

/// Errors that prevent a check from starting
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),
}
