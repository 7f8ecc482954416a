//! repocheck CLI
//!
//! Checks that the repository an installed package came from is still
//! enabled, and prints a recommendation when it is not.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{ArgAction, Parser};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use repocheck_core::{Advisory, CheckConfig, RepositoryChecker};
use repocheck_exec::{CommandExecutor, LocalExecutor};
use repocheck_pkg::PackageNames;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod render;

use render::OutputFormat;

/// Check that a package's origin repository is still enabled
#[derive(Parser, Debug)]
#[command(name = "repocheck", version, about)]
struct Args {
    /// Product name used in advisory text
    #[arg(long, env = "REPOCHECK_PRODUCT", default_value = "GitLab")]
    product: String,

    /// Community edition package name
    #[arg(long, env = "REPOCHECK_COMMUNITY_PACKAGE", default_value = "gitlab-ce")]
    community_package: String,

    /// Enterprise edition package name
    #[arg(long, env = "REPOCHECK_ENTERPRISE_PACKAGE", default_value = "gitlab-ee")]
    enterprise_package: String,

    /// Timeout for each package manager query, in seconds
    #[arg(long, env = "REPOCHECK_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Output format
    #[arg(long, env = "REPOCHECK_FORMAT", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Exit with a distinct status per advisory (2 manual install,
    /// 3 not from a repository, 4 repository not enabled)
    #[arg(long, env = "REPOCHECK_EXIT_CODE")]
    exit_code: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn check_config(&self) -> CheckConfig {
        CheckConfig::default()
            .with_product(&self.product)
            .with_packages(PackageNames::new(
                &self.community_package,
                &self.enterprise_package,
            ))
            .with_timeout(Duration::from_secs(self.timeout))
    }
}

/// Logs go to stderr so stdout carries only advisories; `RUST_LOG` overrides `-v`
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_status(advisory: Option<Advisory>) -> u8 {
    match advisory {
        None => 0,
        Some(Advisory::ManualInstall) => 2,
        Some(Advisory::NotFromRepository) => 3,
        Some(Advisory::RepositoryDisabled | Advisory::RepositoryUntracked) => 4,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();
    init_tracing(args.verbose);

    let executor: Arc<dyn CommandExecutor> = Arc::new(LocalExecutor::new());
    let checker =
        RepositoryChecker::new(executor, args.check_config()).wrap_err("invalid arguments")?;

    let report = checker.run().await;
    debug!(outcome = ?report.outcome, backend = ?report.backend, "check finished");

    render::write_report(&mut std::io::stdout().lock(), &report, args.format)?;

    if args.exit_code {
        Ok(ExitCode::from(exit_status(report.advisory_kind())))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
