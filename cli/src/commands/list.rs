//! `shelp list` — print installed package names.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::maintenance;
use crate::output::json;

/// Run `shelp list`.
///
/// # Errors
///
/// Returns an error if the packages directory cannot be read.
pub fn run(app: &AppContext) -> Result<ExitCode> {
    let reporter = app.terminal_reporter();
    let packages = maintenance::list(&app.env(&reporter))?;

    if app.is_json() {
        app.output.line(&json::format_list(&packages)?);
    } else if packages.is_empty() {
        eprintln!("No package is installed");
    } else {
        for pkg in &packages {
            app.output.line(&pkg.name);
        }
    }
    Ok(ExitCode::SUCCESS)
}
