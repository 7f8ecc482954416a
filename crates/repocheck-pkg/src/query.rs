//! Helpers for building and running backend query commands

use std::borrow::Cow;
use std::time::Duration;

use repocheck_exec::{CommandExecutor, CommandResult};
use tracing::debug;

use crate::error::PackageError;

/// Quote a single shell argument
pub(crate) fn quote<'a>(tool: &'static str, value: &'a str) -> Result<Cow<'a, str>, PackageError> {
    if value.is_empty() {
        return Err(PackageError::InvalidArgument {
            tool,
            value: value.to_string(),
        });
    }
    shlex::try_quote(value).map_err(|_| PackageError::InvalidArgument {
        tool,
        value: value.to_string(),
    })
}

/// Run a query command under the backend's timeout
pub(crate) async fn run(
    executor: &dyn CommandExecutor,
    cmd: &str,
    timeout: Duration,
) -> Result<CommandResult, PackageError> {
    let result = executor.run_with_timeout(cmd, timeout).await?;
    debug!(command = %cmd, status = result.status, "query finished");
    Ok(result)
}

/// Last whitespace-separated field of `text`
pub(crate) fn last_field(text: &str) -> Option<&str> {
    text.split_whitespace().next_back()
}
