//! `shelp upgrade [<package>]` — pull upstream changes.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::maintenance;

/// Arguments for the upgrade command.
#[derive(Args)]
pub struct UpgradeArgs {
    /// Package to upgrade (all cloned packages when omitted)
    pub name: Option<String>,
}

/// Run `shelp upgrade`.
///
/// # Errors
///
/// Returns an error if the package is not installed or pulls fail.
pub async fn run(args: &UpgradeArgs, app: &AppContext) -> Result<ExitCode> {
    let reporter = app.terminal_reporter();
    maintenance::upgrade(&app.env(&reporter), args.name.as_deref()).await?;
    Ok(ExitCode::SUCCESS)
}
