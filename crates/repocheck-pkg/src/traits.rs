//! Repository backend trait

use async_trait::async_trait;
use tracing::debug;

use crate::error::PackageError;
use crate::types::{BackendKind, Edition, Enablement, Origin, PackageNames};

/// A package-manager family able to answer the three origin questions
///
/// Each method is a single query (or a fixed pair) against the backend's own
/// tooling. Interpreting the answers, and deciding when to stop, belongs to
/// the caller.
#[async_trait]
pub trait RepositoryBackend: Send + Sync {
    /// Whether `package` is present in the package database
    async fn is_package_installed(&self, package: &str) -> Result<bool, PackageError>;

    /// Repository the installed version of `package` originated from
    async fn resolve_origin_repository(&self, package: &str) -> Result<Origin, PackageError>;

    /// Whether `repository` is currently enabled
    async fn is_repository_enabled(&self, repository: &str) -> Result<Enablement, PackageError>;

    /// Backend family
    fn kind(&self) -> BackendKind;

    /// Find the installed edition, community first; `None` if neither is installed
    async fn detect_installed_variant(
        &self,
        packages: &PackageNames,
    ) -> Result<Option<Edition>, PackageError> {
        for (edition, name) in packages.candidates() {
            if self.is_package_installed(name).await? {
                debug!(backend = %self.kind(), package = name, "found installed package");
                return Ok(Some(edition));
            }
        }
        Ok(None)
    }
}
