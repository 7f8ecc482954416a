//! Command executor trait

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ExecError;
use crate::result::CommandResult;

/// Runs backend query commands and probes the filesystem
///
/// Implementations must not treat a non-zero exit status as an error: the
/// status is part of the [`CommandResult`] and callers interpret it.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run a shell command, failing with [`ExecError::Timeout`] past `timeout`
    async fn run_with_timeout(
        &self,
        cmd: &str,
        timeout: Duration,
    ) -> Result<CommandResult, ExecError>;

    /// Check whether `path` exists and is a regular file
    async fn file_exists(&self, path: &Path) -> bool;

    /// Short name for logging
    fn executor_type(&self) -> &'static str;
}
