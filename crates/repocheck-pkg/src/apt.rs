//! APT backend (Debian/Ubuntu)

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use repocheck_exec::CommandExecutor;
use tracing::{debug, info, instrument, warn};

use crate::error::PackageError;
use crate::query;
use crate::traits::RepositoryBackend;
use crate::types::{BackendKind, DisabledReason, Enablement, Origin};

/// Field in `apt show` output naming the package source
pub const SOURCES_FIELD: &str = "APT-Sources";

/// Source apt reports when the only record left is dpkg's own status file
pub const NOT_FROM_REPOSITORY: &str = "/var/lib/dpkg/status";

/// APT backend implementation
pub struct AptBackend {
    /// Executor for running dpkg, apt and apt-cache
    executor: Arc<dyn CommandExecutor>,
    /// Per-command timeout
    timeout: Duration,
}

impl AptBackend {
    /// Create a new APT backend
    pub fn new(executor: Arc<dyn CommandExecutor>, timeout: Duration) -> Self {
        Self { executor, timeout }
    }

    /// Parse `apt show <package>` output
    ///
    /// Example: `APT-Sources: https://packages.gitlab.com/gitlab/gitlab-ee/ubuntu jammy/main amd64 Packages`
    ///
    /// The source is the text after the last `:` on the line, which leaves
    /// `//packages.gitlab.com/...` for a URL. That remainder is still a
    /// substring of the matching `apt-cache policy` row.
    fn parse_show(output: &str) -> Origin {
        let Some(line) = output.lines().rfind(|line| line.contains(SOURCES_FIELD)) else {
            return Origin::Unknown;
        };

        let source = line.rsplit(':').next().unwrap_or_default().trim();
        if source.contains(NOT_FROM_REPOSITORY) {
            Origin::NotFromRepository
        } else if source.is_empty() {
            Origin::Unknown
        } else {
            Origin::Repository(source.to_string())
        }
    }

    /// Whether the policy listing still carries the source
    fn parse_policy(output: &str, source: &str) -> Enablement {
        if output.contains(source) {
            Enablement::Enabled
        } else {
            Enablement::Disabled(DisabledReason::MissingFromPolicy)
        }
    }
}

#[async_trait]
impl RepositoryBackend for AptBackend {
    #[instrument(skip(self))]
    async fn is_package_installed(&self, package: &str) -> Result<bool, PackageError> {
        let cmd = format!("dpkg -s {}", query::quote("dpkg", package)?);
        let result = query::run(self.executor.as_ref(), &cmd, self.timeout).await?;

        Ok(result.success())
    }

    #[instrument(skip(self))]
    async fn resolve_origin_repository(&self, package: &str) -> Result<Origin, PackageError> {
        let cmd = format!("apt show {}", query::quote("apt", package)?);
        let result = query::run(self.executor.as_ref(), &cmd, self.timeout).await?;

        let origin = Self::parse_show(&result.combined_output());
        info!(?origin, "resolved origin repository");
        Ok(origin)
    }

    #[instrument(skip(self))]
    async fn is_repository_enabled(&self, repository: &str) -> Result<Enablement, PackageError> {
        let result = query::run(self.executor.as_ref(), "apt-cache policy", self.timeout).await?;

        if !result.success() {
            warn!(status = result.status, "apt-cache policy failed");
            return Ok(Enablement::Indeterminate);
        }

        let enablement = Self::parse_policy(&result.stdout, repository);
        debug!(?enablement, "checked repository");
        Ok(enablement)
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Apt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show_repository() {
        let output = r"
WARNING: apt does not have a stable CLI interface. Use with caution in scripts.

Package: gitlab-ee
Version: 16.0.0-ee.0
APT-Sources: https://packages.gitlab.com/gitlab/gitlab-ee/ubuntu jammy/main amd64 Packages
Description: GitLab Enterprise Edition";

        assert_eq!(
            AptBackend::parse_show(output),
            Origin::Repository(
                "//packages.gitlab.com/gitlab/gitlab-ee/ubuntu jammy/main amd64 Packages"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_parse_show_dpkg_status() {
        let output = "Package: gitlab-ce\nAPT-Sources: /var/lib/dpkg/status\n";
        assert_eq!(AptBackend::parse_show(output), Origin::NotFromRepository);
    }

    #[test]
    fn test_parse_show_missing_field() {
        assert_eq!(AptBackend::parse_show("Package: gitlab-ce\n"), Origin::Unknown);
        assert_eq!(AptBackend::parse_show("APT-Sources:\n"), Origin::Unknown);
    }

    #[test]
    fn test_parse_policy() {
        let policy = r"Package files:
 100 /var/lib/dpkg/status
     release a=now
 500 https://packages.gitlab.com/gitlab/gitlab-ee/ubuntu jammy/main amd64 Packages
     release o=packages.gitlab.com/gitlab/gitlab-ee,a=jammy,n=jammy,c=main,b=amd64";
        let source = "//packages.gitlab.com/gitlab/gitlab-ee/ubuntu jammy/main amd64 Packages";

        assert_eq!(AptBackend::parse_policy(policy, source), Enablement::Enabled);
        assert_eq!(
            AptBackend::parse_policy(" 100 /var/lib/dpkg/status", source),
            Enablement::Disabled(DisabledReason::MissingFromPolicy)
        );
    }
}
