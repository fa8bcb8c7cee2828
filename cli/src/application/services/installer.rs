//! Application service — install or reinstall one package.
//!
//! `checking → {already satisfied | reinstalling | fresh installing} →
//! linking → done`. Clones are staged in a directory under `tmp/` which is
//! deleted on every exit path; the package directory is only touched once a
//! clone has succeeded.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{CloneOptions, PackageFs, ProgressReporter, VersionControl};
use crate::application::services::PackageEnv;
use crate::application::services::linker::{
    LinkReport, link_all_executables, link_listed_executables, unlink_package_executables,
};
use crate::domain::plan::needs_full_clone;
use crate::domain::{
    Existing, InstallPlan, InstalledState, PackageDescriptor, PackageError, plan_install,
};

/// What `install` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed(LinkReport),
    Reinstalled(LinkReport),
    /// An equivalent package, or a pseudo-install without overwrite, was
    /// already in place. Nothing was touched.
    AlreadySatisfied,
}

impl InstallOutcome {
    /// Installed, but some executables could not be linked.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        match self {
            Self::Installed(report) | Self::Reinstalled(report) => report.is_degraded(),
            Self::AlreadySatisfied => false,
        }
    }
}

/// A package to install and how to expose it.
#[derive(Debug, Clone)]
pub struct InstallRequest<'a> {
    pub package: PackageDescriptor,
    /// Explicit executables relative to the package directory; empty means
    /// auto-discovery.
    pub bins: &'a [String],
    /// Replace pseudo-installs and mismatched clones (bundle semantics).
    pub overwrite: bool,
}

/// Install `request.package` under `packages/<name>`.
///
/// # Errors
///
/// Returns [`PackageError::AlreadyInstalled`] when the name is taken by a
/// different package and overwrite was not requested. Clone failures leave
/// no trace. Failures after the clone (replacing the old directory,
/// linking) return [`PackageError::OperationFailed`]; linking failures leave
/// the new package in place.
pub async fn install<V, F, R>(
    env: &PackageEnv<'_, V, F, R>,
    request: &InstallRequest<'_>,
) -> Result<InstallOutcome>
where
    V: VersionControl,
    F: PackageFs,
    R: ProgressReporter,
{
    let pkg = &request.package;
    let path = env.layout.package_path(&pkg.name);

    let existing = inspect_existing(env, &path).await?;
    let plan = plan_install(pkg, &existing, request.overwrite);
    tracing::debug!(package = %pkg.name, ?existing, ?plan, "install plan");

    match plan {
        InstallPlan::AlreadySatisfied => return Ok(InstallOutcome::AlreadySatisfied),
        InstallPlan::Conflict => {
            return Err(PackageError::AlreadyInstalled(pkg.name.clone()).into());
        }
        InstallPlan::FreshInstall | InstallPlan::Reinstall => {}
    }

    env.prepare_directories()?;
    let (staging, _guard) = env
        .fs
        .staging_dir(&env.layout.temp_dir(), &pkg.name)
        .context("creating staging directory")?;
    let staged = staging.join(&pkg.name);

    env.reporter.step(&format!("Cloning {} ...", pkg.url));
    let opts = CloneOptions {
        git_ref: pkg.git_ref.as_deref(),
        is_commit_hash: pkg.is_commit_hash,
        shallow: !needs_full_clone(pkg, env.shallow),
        verbose: env.verbose,
    };
    env.vcs
        .clone_repo(&pkg.url, &staged, &opts)
        .await
        .map_err(|e| PackageError::OperationFailed(format!("Cloning {} failed: {e:#}", pkg.url)))?;

    if plan == InstallPlan::Reinstall {
        replace_package(env, &path, &staged, &staging.join(format!("{}.old", pkg.name)))?;
    } else {
        env.fs.rename(&staged, &path).map_err(|e| {
            PackageError::OperationFailed(format!(
                "Moving clone into {} failed: {e:#}",
                path.display()
            ))
        })?;
    }

    let report = link_package(env, &path, request.bins).map_err(|e| {
        PackageError::OperationFailed(format!(
            "\"{}\" is installed, but linking executables failed: {e:#}",
            pkg.name
        ))
    })?;

    if report.is_degraded() {
        env.reporter
            .warn(&format!("\"{}\" is installed, but with some failures", pkg.name));
    } else {
        env.reporter.success(&format!("\"{}\" is installed", pkg.name));
    }

    Ok(match plan {
        InstallPlan::Reinstall => InstallOutcome::Reinstalled(report),
        _ => InstallOutcome::Installed(report),
    })
}

/// Link a package's executables, from `bins` if given, otherwise by
/// auto-discovery.
///
/// # Errors
///
/// Returns an error for any linking failure other than a name collision.
pub fn link_package<V, F, R>(
    env: &PackageEnv<'_, V, F, R>,
    path: &Path,
    bins: &[String],
) -> Result<LinkReport>
where
    V: VersionControl,
    F: PackageFs,
    R: ProgressReporter,
{
    if bins.is_empty() {
        link_all_executables(env, path)
    } else {
        link_listed_executables(env, path, bins)
    }
}

async fn inspect_existing<V, F, R>(env: &PackageEnv<'_, V, F, R>, path: &Path) -> Result<Existing>
where
    V: VersionControl,
    F: PackageFs,
    R: ProgressReporter,
{
    if !env.fs.exists(path) {
        return Ok(Existing::Absent);
    }
    if env.fs.is_symlink(path) {
        return Ok(Existing::PseudoInstall);
    }
    let worktree = env
        .vcs
        .worktree(path, env.verbose)
        .await
        .with_context(|| format!("reading worktree of {}", path.display()))?;
    Ok(Existing::Clone(InstalledState::from(&worktree)))
}

/// Swap the old package for the staged clone.
///
/// The old directory is moved to `backup` inside the staging area, so it is
/// deleted together with the staging directory, and restored if the staged
/// clone cannot be moved into place. Old links are only removed once the new
/// clone is in place; a restored package keeps its links.
fn replace_package<V, F, R>(
    env: &PackageEnv<'_, V, F, R>,
    path: &Path,
    staged: &Path,
    backup: &Path,
) -> Result<()>
where
    V: VersionControl,
    F: PackageFs,
    R: ProgressReporter,
{
    env.fs.rename(path, backup).map_err(|e| {
        PackageError::OperationFailed(format!(
            "Removing old package {} failed: {e:#}",
            path.display()
        ))
    })?;

    if let Err(e) = env.fs.rename(staged, path) {
        if let Err(restore) = env.fs.rename(backup, path) {
            tracing::warn!(error = %restore, path = %path.display(), "failed to restore old package");
            return Err(PackageError::OperationFailed(format!(
                "Moving clone into {} failed: {e:#}; restoring the old package failed: {restore:#}",
                path.display()
            ))
            .into());
        }
        return Err(PackageError::OperationFailed(format!(
            "Moving clone into {} failed: {e:#}",
            path.display()
        ))
        .into());
    }

    unlink_package_executables(env, path).map_err(|e| {
        PackageError::OperationFailed(format!("Unlinking old executables failed: {e:#}"))
    })?;
    Ok(())
}
