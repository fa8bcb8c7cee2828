//! `shelp prune [--link]` — remove packages not declared in the config file.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::reconciler;
use crate::domain::PackageError;

/// Arguments for the prune command.
#[derive(Args)]
pub struct PruneArgs {
    /// Prune packages created with `link` as well
    #[arg(long)]
    pub link: bool,
}

/// Run `shelp prune`.
///
/// # Errors
///
/// Returns `Canceled` when there is nothing to prune or the user declines,
/// and `Warning`/`OperationFailed` when removals fail.
pub fn run(args: &PruneArgs, app: &AppContext) -> Result<ExitCode> {
    let reporter = app.terminal_reporter();
    let env = app.env(&reporter);

    let plan = reconciler::prune_plan(&env, &app.config.packages, args.link)?;
    if plan.is_noop() {
        return Err(PackageError::Canceled("Nothing to prune".to_string()).into());
    }

    if !app.assume_yes {
        app.output.header("Packages to remove:");
        for name in &plan.prunees {
            app.output.line(&format!("  {name}"));
        }
        if !app.confirm("Okay?", true)? {
            return Err(PackageError::Canceled("Canceled".to_string()).into());
        }
    }

    reconciler::prune(&env, &plan.prunees)?;
    Ok(ExitCode::SUCCESS)
}
