//! Backend selection by probing for package-manager executables

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use repocheck_exec::CommandExecutor;
use repocheck_pkg::{AptBackend, BackendKind, RepositoryBackend, YumBackend, ZypperBackend};
use tracing::{debug, info, instrument};

/// Find the first backend whose executable exists, in yum → apt → zypper order
///
/// `None` means the host has no supported package manager.
#[instrument(skip(executor), fields(executor = executor.executor_type()))]
pub async fn probe_backend_kind(executor: &dyn CommandExecutor) -> Option<BackendKind> {
    for kind in BackendKind::PRIORITY {
        let path = kind.probe_path();
        if executor.file_exists(Path::new(path)).await {
            info!(backend = %kind, path, "detected package manager");
            return Some(kind);
        }
        debug!(path, "executable not present");
    }
    None
}

/// Build the backend for `kind`
pub fn create_backend(
    kind: BackendKind,
    executor: Arc<dyn CommandExecutor>,
    timeout: Duration,
) -> Arc<dyn RepositoryBackend> {
    match kind {
        BackendKind::Yum => Arc::new(YumBackend::new(executor, timeout)),
        BackendKind::Apt => Arc::new(AptBackend::new(executor, timeout)),
        BackendKind::Zypper => Arc::new(ZypperBackend::new(executor, timeout)),
    }
}
