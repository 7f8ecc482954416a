//! The repository enablement check

use std::sync::Arc;

use repocheck_exec::CommandExecutor;
use repocheck_pkg::{BackendKind, Edition, Enablement, Origin, PackageError, RepositoryBackend};
use tracing::{info, instrument, warn};

use crate::advisory::{CheckOutcome, CheckReport, Stage};
use crate::config::CheckConfig;
use crate::dispatcher::{create_backend, probe_backend_kind};
use crate::error::CoreError;

/// Runs the check against the local package manager
///
/// Each query runs only after the previous one answered, and the first
/// conclusive answer ends the run. Failed or unreadable queries end it too,
/// silently: only explicit negative evidence is reported.
pub struct RepositoryChecker {
    executor: Arc<dyn CommandExecutor>,
    config: CheckConfig,
}

impl RepositoryChecker {
    /// Create a checker
    ///
    /// # Errors
    /// Returns `CoreError::ConfigError` if `config` does not validate.
    pub fn new(executor: Arc<dyn CommandExecutor>, config: CheckConfig) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self { executor, config })
    }

    /// Probe for a backend and run the check against it
    #[instrument(skip(self))]
    pub async fn run(&self) -> CheckReport {
        let Some(kind) = probe_backend_kind(self.executor.as_ref()).await else {
            info!("no supported package manager found, nothing to check");
            return self.report(None, None, CheckOutcome::NoBackend);
        };

        let backend = create_backend(kind, Arc::clone(&self.executor), self.config.timeout);
        self.check_with(backend.as_ref()).await
    }

    /// Run the check against a specific backend
    #[instrument(skip_all, fields(backend = %backend.kind()))]
    pub async fn check_with(&self, backend: &dyn RepositoryBackend) -> CheckReport {
        let kind = backend.kind();

        let edition = match backend.detect_installed_variant(&self.config.packages).await {
            Ok(Some(edition)) => edition,
            Ok(None) => {
                info!("neither edition is installed as a package");
                return self.report(Some(kind), None, CheckOutcome::ManualInstall);
            }
            Err(e) => return self.indeterminate(kind, None, Stage::Variant, &e),
        };

        let package = self.config.packages.name(edition);
        let repository = match backend.resolve_origin_repository(package).await {
            Ok(Origin::Repository(repository)) => repository,
            Ok(Origin::NotFromRepository) => {
                info!(package, "package was not installed from a repository");
                return self.report(Some(kind), Some(edition), CheckOutcome::NotFromRepository);
            }
            Ok(Origin::Unknown) => {
                return self.unanswered(kind, Some(edition), Stage::Origin, "unrecognised output");
            }
            Err(e) => return self.indeterminate(kind, Some(edition), Stage::Origin, &e),
        };

        let outcome = match backend.is_repository_enabled(&repository).await {
            Ok(Enablement::Enabled) => {
                info!(%repository, "origin repository is enabled");
                CheckOutcome::Enabled { repository }
            }
            Ok(Enablement::Disabled(reason)) => {
                info!(%repository, ?reason, "origin repository is not enabled");
                CheckOutcome::RepositoryDisabled { repository, reason }
            }
            Ok(Enablement::Indeterminate) => {
                return self.unanswered(
                    kind,
                    Some(edition),
                    Stage::Enablement,
                    "unrecognised output",
                );
            }
            Err(e) => return self.indeterminate(kind, Some(edition), Stage::Enablement, &e),
        };

        self.report(Some(kind), Some(edition), outcome)
    }

    fn report(
        &self,
        backend: Option<BackendKind>,
        edition: Option<Edition>,
        outcome: CheckOutcome,
    ) -> CheckReport {
        CheckReport::new(&self.config.product, backend, edition, outcome)
    }

    fn indeterminate(
        &self,
        backend: BackendKind,
        edition: Option<Edition>,
        stage: Stage,
        error: &PackageError,
    ) -> CheckReport {
        if error.is_retryable() {
            warn!(
                timeout = ?self.config.timeout,
                "query did not finish in time, a longer timeout may let the check conclude"
            );
        }
        self.unanswered(backend, edition, stage, &error.to_string())
    }

    fn unanswered(
        &self,
        backend: BackendKind,
        edition: Option<Edition>,
        stage: Stage,
        detail: &str,
    ) -> CheckReport {
        warn!(backend = %backend, ?stage, detail, "check is indeterminate, staying silent");
        self.report(
            Some(backend),
            edition,
            CheckOutcome::Indeterminate {
                stage,
                detail: detail.to_string(),
            },
        )
    }
}
