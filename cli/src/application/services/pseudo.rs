//! Application service — pseudo-install of a local directory (`link`).

use std::path::Path;

use anyhow::Result;

use crate::application::ports::{PackageFs, ProgressReporter, VersionControl};
use crate::application::services::PackageEnv;
use crate::application::services::linker::{LinkReport, link_all_executables};
use crate::domain::{PackageError, validate_explicit_name};

/// Symlink `packages/<name>` to the absolute directory `source`, then link
/// its executables. `name` defaults to the basename of `source`.
///
/// Returns the package name and the link report.
///
/// # Errors
///
/// Returns [`PackageError::InvalidName`] for a bad explicit name,
/// [`PackageError::AlreadyInstalled`] when the name is taken and
/// [`PackageError::OperationFailed`] for filesystem failures.
pub fn link_local<V, F, R>(
    env: &PackageEnv<'_, V, F, R>,
    source: &Path,
    name: Option<&str>,
) -> Result<(String, LinkReport)>
where
    V: VersionControl,
    F: PackageFs,
    R: ProgressReporter,
{
    let name = match name {
        Some(name) => {
            validate_explicit_name(name)?;
            name.to_string()
        }
        None => {
            let base = source
                .file_name()
                .map(|b| b.to_string_lossy().into_owned())
                .ok_or_else(|| PackageError::InvalidName(source.display().to_string()))?;
            validate_explicit_name(&base)?;
            base
        }
    };

    env.prepare_directories()
        .map_err(|e| PackageError::OperationFailed(format!("{e:#}")))?;

    let path = env.layout.package_path(&name);
    if env.fs.exists(&path) {
        return Err(PackageError::AlreadyInstalled(name).into());
    }
    env.fs
        .symlink(source, &path)
        .map_err(|e| PackageError::OperationFailed(format!("{e:#}")))?;
    tracing::debug!(link = %path.display(), target = %source.display(), "pseudo-installed");

    let report = link_all_executables(env, &path).map_err(|e| {
        PackageError::OperationFailed(format!(
            "\"{}\" is linked as package \"{name}\", but linking executables failed: {e:#}",
            source.display()
        ))
    })?;

    if report.is_degraded() {
        env.reporter.warn(&format!(
            "\"{}\" is linked as package \"{name}\", but with some failures",
            source.display()
        ));
    } else {
        env.reporter.success(&format!(
            "\"{}\" is linked as package \"{name}\"",
            source.display()
        ));
    }
    Ok((name, report))
}
