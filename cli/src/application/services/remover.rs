//! Application service — package removal.
//!
//! Shared by `remove` and `prune`: unlink executables first, then delete the
//! package directory (or just the link, for a pseudo-install).

use anyhow::Result;

use crate::application::ports::{PackageFs, ProgressReporter, VersionControl};
use crate::application::services::PackageEnv;
use crate::application::services::linker::unlink_package_executables;
use crate::domain::PackageError;

/// Remove the installed package `name`.
///
/// # Errors
///
/// Returns [`PackageError::NotInstalled`] if nothing is installed under that
/// name, and [`PackageError::OperationFailed`] if its links or directory
/// cannot be removed.
pub fn remove_package<V, F, R>(env: &PackageEnv<'_, V, F, R>, name: &str) -> Result<()>
where
    V: VersionControl,
    F: PackageFs,
    R: ProgressReporter,
{
    let path = env.layout.package_path(name);
    if !env.fs.exists(&path) {
        return Err(PackageError::NotInstalled(name.to_string()).into());
    }

    unlink_package_executables(env, &path).map_err(|e| {
        PackageError::OperationFailed(format!("Unlinking executables of \"{name}\" failed: {e:#}"))
    })?;

    env.fs.remove_all(&path).map_err(|e| {
        PackageError::OperationFailed(format!(
            "Package removal failed. Path = {}: {e:#}",
            path.display()
        ))
    })?;

    env.reporter.success(&format!("\"{name}\" is removed"));
    Ok(())
}
