//! yum backend (RHEL/CentOS)

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use repocheck_exec::CommandExecutor;
use tracing::{debug, info, instrument};

use crate::error::PackageError;
use crate::query::{self, last_field};
use crate::traits::RepositoryBackend;
use crate::types::{BackendKind, DisabledReason, Enablement, Origin};

/// yum executable, also the probe path for this backend
pub const YUM_BIN: &str = "/usr/bin/yum";

/// Repository token yum reports for packages installed from a local rpm
pub const NOT_FROM_REPOSITORY: &str = "installed";

/// Marker in a repolist row for a disabled repository
pub const DISABLED_MARKER: &str = "disabled";

/// yum/rpm backend implementation
pub struct YumBackend {
    /// Executor for running rpm and yum
    executor: Arc<dyn CommandExecutor>,
    /// Per-command timeout
    timeout: Duration,
}

impl YumBackend {
    /// Create a new yum backend
    pub fn new(executor: Arc<dyn CommandExecutor>, timeout: Duration) -> Self {
        Self { executor, timeout }
    }

    /// Whether `rpm -qa <package>` output names the package
    fn parse_rpm_query(output: &str, package: &str) -> bool {
        output.contains(package)
    }

    /// Parse `yum list installed <package>` stdout
    ///
    /// Warnings go to stderr and are never part of the table, so they are
    /// left out: a trailing warning would otherwise supply the last field.
    ///
    /// yum wraps long rows, so the repository is the last field of everything
    /// from the package row onwards, not necessarily of the package row itself.
    ///
    /// Example row: `gitlab-ee.x86_64   16.0.0-ee.0.el8   @gitlab_gitlab-ee`
    fn parse_list_installed(output: &str, package: &str) -> Origin {
        let prefix = format!("{package}.");
        let Some(start) = output
            .lines()
            .position(|line| line.starts_with(&prefix))
        else {
            return Origin::Unknown;
        };

        let tail = output.lines().skip(start).collect::<Vec<_>>().join("\n");
        match last_field(&tail).map(|field| field.strip_prefix('@').unwrap_or(field)) {
            Some(NOT_FROM_REPOSITORY) => Origin::NotFromRepository,
            Some(repo) => Origin::Repository(repo.to_string()),
            None => Origin::Unknown,
        }
    }

    /// Parse `yum repolist enabled <repo>` stdout
    ///
    /// Only rows mentioning the repository count; the status is the last field
    /// of the last such row.
    fn parse_repolist(output: &str, repository: &str) -> Enablement {
        let Some(status) = output
            .lines()
            .filter(|line| line.contains(repository))
            .filter_map(last_field)
            .next_back()
        else {
            return Enablement::Indeterminate;
        };

        if status.contains(DISABLED_MARKER) {
            Enablement::Disabled(DisabledReason::ExplicitlyDisabled)
        } else {
            Enablement::Enabled
        }
    }
}

#[async_trait]
impl RepositoryBackend for YumBackend {
    #[instrument(skip(self))]
    async fn is_package_installed(&self, package: &str) -> Result<bool, PackageError> {
        let cmd = format!("rpm -qa {}", query::quote("rpm", package)?);
        let result = query::run(self.executor.as_ref(), &cmd, self.timeout).await?;

        Ok(Self::parse_rpm_query(&result.stdout, package))
    }

    #[instrument(skip(self))]
    async fn resolve_origin_repository(&self, package: &str) -> Result<Origin, PackageError> {
        let cmd = format!(
            "{YUM_BIN} -C list installed {}",
            query::quote("yum", package)?
        );
        let result = query::run(self.executor.as_ref(), &cmd, self.timeout).await?;
        if !result.stderr.is_empty() {
            debug!(stderr = %result.stderr.trim(), "yum list reported warnings");
        }

        let origin = Self::parse_list_installed(&result.stdout, package);
        info!(?origin, "resolved origin repository");
        Ok(origin)
    }

    #[instrument(skip(self))]
    async fn is_repository_enabled(&self, repository: &str) -> Result<Enablement, PackageError> {
        let cmd = format!(
            "{YUM_BIN} -C repolist enabled {}",
            query::quote("yum", repository)?
        );
        let result = query::run(self.executor.as_ref(), &cmd, self.timeout).await?;
        if !result.stderr.is_empty() {
            debug!(stderr = %result.stderr.trim(), "yum repolist reported warnings");
        }

        let enablement = Self::parse_repolist(&result.stdout, repository);
        debug!(?enablement, "checked repository");
        Ok(enablement)
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Yum
    }
}

#[cfg(test)]
mod tests {
    use repocheck_exec::CommandResult;

    use super::*;

    #[test]
    fn test_parse_rpm_query() {
        assert!(YumBackend::parse_rpm_query(
            "gitlab-ee-16.0.0-ee.0.el8.x86_64\n",
            "gitlab-ee"
        ));
        assert!(!YumBackend::parse_rpm_query("", "gitlab-ce"));
    }

    #[test]
    fn test_parse_list_installed_repository() {
        let output = r"Loaded plugins: fastestmirror
Installed Packages
gitlab-ee.x86_64                 16.0.0-ee.0.el7                 @gitlab_gitlab-ee";

        assert_eq!(
            YumBackend::parse_list_installed(output, "gitlab-ee"),
            Origin::Repository("gitlab_gitlab-ee".to_string())
        );
    }

    #[test]
    fn test_parse_list_installed_wrapped_row() {
        let output = r"Installed Packages
gitlab-ce.x86_64
                 16.0.0-ce.0.el7                 @gitlab_gitlab-ce";

        assert_eq!(
            YumBackend::parse_list_installed(output, "gitlab-ce"),
            Origin::Repository("gitlab_gitlab-ce".to_string())
        );
    }

    #[test]
    fn test_parse_list_installed_local_rpm() {
        let output = r"Installed Packages
gitlab-ee.x86_64                 16.0.0-ee.0.el7                 installed";
        assert_eq!(
            YumBackend::parse_list_installed(output, "gitlab-ee"),
            Origin::NotFromRepository
        );

        let output = "gitlab-ee.x86_64   16.0.0-ee.0.el7   @installed";
        assert_eq!(
            YumBackend::parse_list_installed(output, "gitlab-ee"),
            Origin::NotFromRepository
        );
    }

    #[test]
    fn test_parse_list_installed_no_package_row() {
        let output = "Error: No matching Packages to list";
        assert_eq!(
            YumBackend::parse_list_installed(output, "gitlab-ee"),
            Origin::Unknown
        );
    }

    #[test]
    fn test_parse_repolist() {
        let output = r"repo id                 repo name                      status
gitlab_gitlab-ee/x86_64 gitlab_gitlab-ee               1,024
repolist: 1,024";
        assert_eq!(
            YumBackend::parse_repolist(output, "gitlab_gitlab-ee"),
            Enablement::Enabled
        );

        let output = "gitlab_gitlab-ee/x86_64   gitlab_gitlab-ee   disabled";
        assert_eq!(
            YumBackend::parse_repolist(output, "gitlab_gitlab-ee"),
            Enablement::Disabled(DisabledReason::ExplicitlyDisabled)
        );
    }

    #[test]
    fn test_parse_repolist_no_matching_row() {
        assert_eq!(
            YumBackend::parse_repolist("repolist: 0", "gitlab_gitlab-ee"),
            Enablement::Indeterminate
        );
    }

    #[test]
    fn test_stderr_warning_does_not_mask_table() {
        let warning = "Repository R1 is listed more than once in the configuration\n";

        let listed = CommandResult::new(
            0,
            "Installed Packages\ngitlab-ee.x86_64 16.0.0-ee.0.el7 installed\n",
            warning,
        );
        assert_eq!(
            YumBackend::parse_list_installed(&listed.stdout, "gitlab-ee"),
            Origin::NotFromRepository
        );

        let repolist = CommandResult::new(0, "R1    R1 packages    disabled\n", warning);
        assert_eq!(
            YumBackend::parse_repolist(&repolist.stdout, "R1"),
            Enablement::Disabled(DisabledReason::ExplicitlyDisabled)
        );
    }
}
