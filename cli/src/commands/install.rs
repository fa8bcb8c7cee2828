//! `shelp install <repo> [<package-name>]` — install one package.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::installer::{self, InstallOutcome, InstallRequest};
use crate::commands::finish;
use crate::domain::{PackageDescriptor, PackageError, SpecifierArgs};

/// Arguments for the install command.
#[derive(Args)]
pub struct InstallArgs {
    /// Repository: `account/repo[@ref]`, `site/account/repo[@ref]`, or a git URL
    pub specifier: String,

    /// Package name (defaults to the repository name)
    pub name: Option<String>,

    /// Branch, tag or commit to check out (overrides `@ref`)
    #[arg(long)]
    pub at: Option<String>,

    /// Executable to link, relative to the package (repeatable)
    #[arg(long = "bin", value_name = "PATH")]
    pub bins: Vec<String>,
}

/// Run `shelp install`.
///
/// # Errors
///
/// Returns [`PackageError::AlreadyInstalled`] when the name is taken, even
/// by an equivalent package, and any installer failure.
pub async fn run(args: &InstallArgs, app: &AppContext) -> Result<ExitCode> {
    let package = PackageDescriptor::parse(SpecifierArgs {
        from: &args.specifier,
        name: args.name.as_deref(),
        at: args.at.as_deref(),
    })?;
    let name = package.name.clone();

    let reporter = app.terminal_reporter();
    let env = app.env(&reporter);
    let request = InstallRequest {
        package,
        bins: &args.bins,
        overwrite: false,
    };

    match installer::install(&env, &request).await? {
        InstallOutcome::AlreadySatisfied => Err(PackageError::AlreadyInstalled(name).into()),
        outcome => Ok(finish(outcome.is_degraded())),
    }
}
