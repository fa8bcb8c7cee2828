//! `shelp remove <package>` — uninstall one package.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::remover;

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Installed package name
    pub name: String,
}

/// Run `shelp remove`.
///
/// # Errors
///
/// Returns an error if the package is not installed or cannot be removed.
pub fn run(args: &RemoveArgs, app: &AppContext) -> Result<ExitCode> {
    let reporter = app.terminal_reporter();
    remover::remove_package(&app.env(&reporter), &args.name)?;
    Ok(ExitCode::SUCCESS)
}
