//! repocheck-exec: Command execution abstraction
//!
//! Provides the executor trait used by every backend query, plus a local
//! implementation that runs commands through `sh -c` with a bounded timeout.

pub mod error;
pub mod local;
pub mod result;
pub mod traits;

pub use error::ExecError;
pub use local::LocalExecutor;
pub use result::CommandResult;
pub use traits::CommandExecutor;
