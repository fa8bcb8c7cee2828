//! Application service — list, outdated and upgrade.

use anyhow::Result;

use crate::application::ports::{PackageFs, ProgressReporter, VersionControl};
use crate::application::services::PackageEnv;
use crate::domain::{BulkTally, BulkVerdict, InstalledEntry, PackageError};

/// Installed packages, sorted by name.
///
/// # Errors
///
/// Returns an error if `packages/` exists but cannot be read.
pub fn list<V, F, R>(env: &PackageEnv<'_, V, F, R>) -> Result<Vec<InstalledEntry>>
where
    V: VersionControl,
    F: PackageFs,
    R: ProgressReporter,
{
    Ok(env
        .installed_packages()?
        .into_iter()
        .map(|e| InstalledEntry {
            name: e.name,
            is_symlink: e.is_symlink,
        })
        .collect())
}

/// Result of an `outdated` scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutdatedReport {
    /// Packages whose upstream has commits the checkout lacks.
    pub outdated: Vec<String>,
    /// Packages that could not be checked.
    pub failed: Vec<String>,
}

/// Check every cloned package for upstream updates. Pseudo-installs are
/// skipped.
///
/// # Errors
///
/// Returns [`PackageError::NoPackages`] when nothing is installed, and an
/// error if `packages/` cannot be read.
pub async fn outdated<V, F, R>(env: &PackageEnv<'_, V, F, R>) -> Result<OutdatedReport>
where
    V: VersionControl,
    F: PackageFs,
    R: ProgressReporter,
{
    let installed = env.installed_packages()?;
    if installed.is_empty() {
        return Err(PackageError::NoPackages.into());
    }

    let mut report = OutdatedReport::default();
    for entry in installed {
        if entry.is_symlink {
            env.reporter
                .info(&format!("\"{}\" is symbolic link. Skip", entry.name));
            continue;
        }
        env.reporter.step(&format!("Checking {} ...", entry.name));
        match env.vcs.has_update(&entry.path, env.verbose).await {
            Ok(true) => report.outdated.push(entry.name),
            Ok(false) => env.reporter.info(&format!("{} is up-to-date", entry.name)),
            Err(e) => {
                env.reporter
                    .warn(&format!("Checking {} failed: {e:#}", entry.name));
                report.failed.push(entry.name);
            }
        }
    }
    Ok(report)
}

/// Pull the named package, or every cloned package when `name` is `None`.
///
/// # Errors
///
/// Returns [`PackageError::NotInstalled`] for an unknown name,
/// [`PackageError::NoPackages`] when upgrading all with nothing installed,
/// and [`PackageError::OperationFailed`] or [`PackageError::Warning`] when
/// all or some pulls failed.
pub async fn upgrade<V, F, R>(env: &PackageEnv<'_, V, F, R>, name: Option<&str>) -> Result<BulkTally>
where
    V: VersionControl,
    F: PackageFs,
    R: ProgressReporter,
{
    let targets: Vec<(String, bool)> = match name {
        Some(name) => {
            let path = env.layout.package_path(name);
            if !env.fs.exists(&path) {
                return Err(PackageError::NotInstalled(name.to_string()).into());
            }
            vec![(name.to_string(), env.fs.is_symlink(&path))]
        }
        None => {
            let installed = env.installed_packages()?;
            if installed.is_empty() {
                return Err(PackageError::NoPackages.into());
            }
            installed.into_iter().map(|e| (e.name, e.is_symlink)).collect()
        }
    };

    let mut tally = BulkTally::default();
    for (name, is_symlink) in targets {
        if is_symlink {
            env.reporter
                .info(&format!("\"{name}\" is symbolic link. Skip"));
            continue;
        }
        env.reporter.step(&format!("Upgrading {name} ..."));
        match env.vcs.pull(&env.layout.package_path(&name), env.verbose).await {
            Ok(()) => {
                env.reporter.success(&format!("\"{name}\" is upgraded"));
                tally.succeeded += 1;
            }
            Err(e) => {
                env.reporter.error(&format!("Upgrading \"{name}\" failed: {e:#}"));
                tally.failed += 1;
            }
        }
    }

    match tally.verdict() {
        BulkVerdict::Clean => Ok(tally),
        BulkVerdict::Partial => Err(PackageError::Warning("There are some errors".to_string()).into()),
        BulkVerdict::Failed => Err(PackageError::OperationFailed("Upgrade failed".to_string()).into()),
    }
}
