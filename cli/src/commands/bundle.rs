//! `shelp bundle` — install every package declared in the config file.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::reconciler;

/// Run `shelp bundle`.
///
/// Declared packages replace pseudo-installs and mismatched clones of the
/// same name.
///
/// # Errors
///
/// Returns `Canceled` when nothing is declared, `Warning` when some entries
/// failed and `OperationFailed` when all of them did.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    if let Some(file) = &app.config_file {
        tracing::debug!(file = %file.display(), "bundling");
    }
    let reporter = app.terminal_reporter();
    reconciler::bundle(&app.env(&reporter), &app.config.packages).await?;
    Ok(ExitCode::SUCCESS)
}
