//! `shelp destroy` — delete the root directory with everything in it.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::PackageFs;
use crate::domain::PackageError;

/// Run `shelp destroy`.
///
/// Without `--yes`, asks on a terminal and refuses otherwise.
///
/// # Errors
///
/// Returns `OperationFailed` when the root is missing, confirmation is
/// impossible, or deletion fails; `Canceled` when the user declines.
pub fn run(app: &AppContext) -> Result<ExitCode> {
    let root = app.root();
    if !app.fs.exists(root) {
        return Err(PackageError::OperationFailed(format!("Not exist: {}", root.display())).into());
    }

    if !app.assume_yes {
        if !app.can_prompt() {
            return Err(PackageError::OperationFailed(
                "Destruction is canceled because flag \"yes\" is not set".to_string(),
            )
            .into());
        }
        let prompt = format!(
            "Delete all contents in {} including packages and the directory itself. Are you sure?",
            root.display()
        );
        if !app.confirm(&prompt, false)? {
            return Err(PackageError::Canceled("Canceled".to_string()).into());
        }
    }

    app.fs.remove_all(root).map_err(|e| {
        PackageError::OperationFailed(format!("Destruction failed: {e:#}"))
    })?;
    app.output.success(&format!("Deleted: {}", root.display()));
    Ok(ExitCode::SUCCESS)
}
