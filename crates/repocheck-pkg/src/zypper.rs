//! zypper backend (openSUSE/SLES)

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use repocheck_exec::CommandExecutor;
use tracing::{debug, info, instrument};

use crate::error::PackageError;
use crate::query::{self, last_field};
use crate::traits::RepositoryBackend;
use crate::types::{BackendKind, DisabledReason, Enablement, Origin};

/// Pseudo-repository zypper reports for packages installed outside any repository
pub const NOT_FROM_REPOSITORY: &str = "@System";

/// Value of the `Enabled` field for a disabled repository
pub const DISABLED_VALUE: &str = "No";

const NAME_FIELD: &str = "Name";
const REPOSITORY_FIELD: &str = "Repository";
const ENABLED_FIELD: &str = "Enabled";

/// zypper backend implementation
pub struct ZypperBackend {
    /// Executor for running zypper
    executor: Arc<dyn CommandExecutor>,
    /// Per-command timeout
    timeout: Duration,
}

impl ZypperBackend {
    /// Create a new zypper backend
    pub fn new(executor: Arc<dyn CommandExecutor>, timeout: Duration) -> Self {
        Self { executor, timeout }
    }

    fn info_cmd(package: &str) -> Result<String, PackageError> {
        Ok(format!(
            "zypper --no-refresh info {}",
            query::quote("zypper", package)?
        ))
    }

    /// Last field of the last line mentioning `field`
    fn field_value<'a>(output: &'a str, field: &str) -> Option<&'a str> {
        output
            .lines()
            .filter(|line| line.contains(field))
            .filter_map(last_field)
            .next_back()
    }

    /// Whether `zypper info` output has a `Name` row naming the package
    fn parse_info_name(output: &str, package: &str) -> bool {
        output
            .lines()
            .any(|line| line.contains(NAME_FIELD) && line.contains(package))
    }

    /// Parse the `Repository` row of `zypper info` output
    ///
    /// Example: `Repository     : gitlab_gitlab-ee`
    fn parse_info_repository(output: &str) -> Origin {
        match Self::field_value(output, REPOSITORY_FIELD) {
            Some(NOT_FROM_REPOSITORY) => Origin::NotFromRepository,
            // a bare `Repository :` row has the colon as its last field
            Some(":") | None => Origin::Unknown,
            Some(repo) => Origin::Repository(repo.to_string()),
        }
    }

    /// Parse `zypper repos <alias>` output
    ///
    /// No `Enabled` row means zypper does not know the repository.
    fn parse_repos(output: &str) -> Enablement {
        match Self::field_value(output, ENABLED_FIELD) {
            None => Enablement::Disabled(DisabledReason::UnknownRepository),
            Some(DISABLED_VALUE) => Enablement::Disabled(DisabledReason::ExplicitlyDisabled),
            Some(_) => Enablement::Enabled,
        }
    }
}

#[async_trait]
impl RepositoryBackend for ZypperBackend {
    #[instrument(skip(self))]
    async fn is_package_installed(&self, package: &str) -> Result<bool, PackageError> {
        let cmd = Self::info_cmd(package)?;
        let result = query::run(self.executor.as_ref(), &cmd, self.timeout).await?;

        Ok(Self::parse_info_name(&result.stdout, package))
    }

    #[instrument(skip(self))]
    async fn resolve_origin_repository(&self, package: &str) -> Result<Origin, PackageError> {
        let cmd = Self::info_cmd(package)?;
        let result = query::run(self.executor.as_ref(), &cmd, self.timeout).await?;

        let origin = Self::parse_info_repository(&result.stdout);
        info!(?origin, "resolved origin repository");
        Ok(origin)
    }

    #[instrument(skip(self))]
    async fn is_repository_enabled(&self, repository: &str) -> Result<Enablement, PackageError> {
        let cmd = format!("zypper repos {}", query::quote("zypper", repository)?);
        let result = query::run(self.executor.as_ref(), &cmd, self.timeout).await?;

        let enablement = Self::parse_repos(&result.stdout);
        debug!(?enablement, "checked repository");
        Ok(enablement)
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Zypper
    }
}
