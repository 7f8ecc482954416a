//! repocheck-core: Repository enablement check
//!
//! Picks a backend by probing for its executable, then walks the fixed
//! sequence edition → origin repository → enablement, stopping at the first
//! conclusive answer. Only explicit negative evidence produces an advisory.

pub mod advisory;
pub mod checker;
pub mod config;
pub mod dispatcher;
pub mod error;

pub use advisory::{Advisory, CheckOutcome, CheckReport, Stage};
pub use checker::RepositoryChecker;
pub use config::CheckConfig;
pub use dispatcher::{create_backend, probe_backend_kind};
pub use error::CoreError;
