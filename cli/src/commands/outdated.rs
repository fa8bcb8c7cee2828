//! `shelp outdated` — print packages whose upstream has new commits.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::maintenance;
use crate::commands::finish;

/// Run `shelp outdated`.
///
/// Exits with the warning status when some packages could not be checked.
///
/// # Errors
///
/// Returns [`crate::domain::PackageError::NoPackages`] when nothing is
/// installed.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let reporter = app.terminal_reporter();
    let report = maintenance::outdated(&app.env(&reporter)).await?;
    drop(reporter);

    if app.is_json() {
        app.output.line(&serde_json::to_string_pretty(&report.outdated)?);
    } else {
        for name in &report.outdated {
            app.output.line(name);
        }
    }
    Ok(finish(!report.failed.is_empty()))
}
