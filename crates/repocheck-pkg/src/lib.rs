//! repocheck-pkg: Package manager backends
//!
//! Answers three questions per package-manager family (yum, apt, zypper):
//! which edition is installed, which repository it came from, and whether
//! that repository is still enabled.

pub mod apt;
pub mod error;
mod query;
pub mod traits;
pub mod types;
pub mod yum;
pub mod zypper;

pub use apt::AptBackend;
pub use error::PackageError;
pub use traits::RepositoryBackend;
pub use types::{BackendKind, DisabledReason, Edition, Enablement, Origin, PackageNames};
pub use yum::YumBackend;
pub use zypper::ZypperBackend;
