//! Application service — converge installed packages with the declared list.
//!
//! `bundle` installs every declared entry with overwrite semantics; `prune`
//! removes every installed package that no entry resolves to. Per-package
//! failures are tallied and never stop the loop.

use anyhow::Result;

use crate::application::ports::{PackageFs, ProgressReporter, VersionControl};
use crate::application::services::PackageEnv;
use crate::application::services::installer::{InstallOutcome, InstallRequest, install};
use crate::application::services::remover::remove_package;
use crate::domain::{
    BulkTally, BulkVerdict, InstalledEntry, PackageDescriptor, PackageEntry, PackageError,
    PrunePlan, plan_prune,
};

// ── Bundle ────────────────────────────────────────────────────────────────────

/// Install every declared entry, in file order.
///
/// # Errors
///
/// Returns [`PackageError::Canceled`] when nothing is declared,
/// [`PackageError::Warning`] when some entries failed and
/// [`PackageError::OperationFailed`] when all of them did.
pub async fn bundle<V, F, R>(env: &PackageEnv<'_, V, F, R>, entries: &[PackageEntry]) -> Result<BulkTally>
where
    V: VersionControl,
    F: PackageFs,
    R: ProgressReporter,
{
    if entries.is_empty() {
        return Err(PackageError::Canceled("No package is configured".to_string()).into());
    }
    env.prepare_directories()
        .map_err(|e| PackageError::OperationFailed(format!("{e:#}")))?;

    let mut tally = BulkTally::default();
    for entry in entries {
        if bundle_entry(env, entry).await {
            tally.succeeded += 1;
        } else {
            tally.failed += 1;
        }
    }
    tracing::debug!(?tally, "bundle finished");

    match tally.verdict() {
        BulkVerdict::Clean => Ok(tally),
        BulkVerdict::Partial => Err(PackageError::Warning("There are some errors".to_string()).into()),
        BulkVerdict::Failed => Err(PackageError::OperationFailed("Bundle failed".to_string()).into()),
    }
}

/// Install one entry; `true` counts as success.
async fn bundle_entry<V, F, R>(env: &PackageEnv<'_, V, F, R>, entry: &PackageEntry) -> bool
where
    V: VersionControl,
    F: PackageFs,
    R: ProgressReporter,
{
    if entry.from.is_empty() {
        env.reporter
            .warn(&format!("Warning! \"from\" is not specified. Skips. pkg = {entry:?}"));
        return false;
    }

    let package = match PackageDescriptor::parse(entry.specifier()) {
        Ok(package) => package,
        Err(e) => {
            env.reporter.error(&e.to_string());
            return false;
        }
    };
    let name = package.name.clone();
    let request = InstallRequest {
        package,
        bins: &entry.bin,
        overwrite: true,
    };

    match install(env, &request).await {
        Ok(InstallOutcome::AlreadySatisfied) => {
            env.reporter.success(&format!("\"{name}\" is already installed"));
            true
        }
        Ok(_) => true,
        Err(e) if matches!(e.downcast_ref::<PackageError>(), Some(PackageError::AlreadyInstalled(_))) => {
            env.reporter.success(&e.to_string());
            true
        }
        Err(e) => {
            env.reporter.error(&format!("{e:#}"));
            false
        }
    }
}

// ── Prune ─────────────────────────────────────────────────────────────────────

/// Classify installed packages against the declared entries.
///
/// Entries without `from` or with an unparsable specifier are skipped with
/// a warning; they declare nothing.
///
/// # Errors
///
/// Returns [`PackageError::NoPackages`] when nothing is installed, and an
/// error if `packages/` cannot be read.
pub fn prune_plan<V, F, R>(
    env: &PackageEnv<'_, V, F, R>,
    entries: &[PackageEntry],
    prune_links: bool,
) -> Result<PrunePlan>
where
    V: VersionControl,
    F: PackageFs,
    R: ProgressReporter,
{
    let installed: Vec<InstalledEntry> = env
        .installed_packages()?
        .into_iter()
        .map(|e| InstalledEntry {
            name: e.name,
            is_symlink: e.is_symlink,
        })
        .collect();
    if installed.is_empty() {
        return Err(PackageError::NoPackages.into());
    }

    let mut declared = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.from.is_empty() {
            env.reporter
                .warn(&format!("Warning! \"from\" is not specified. Skips. pkg = {entry:?}"));
            continue;
        }
        match PackageDescriptor::parse(entry.specifier()) {
            Ok(pkg) => {
                if declared.contains(&pkg.name) {
                    tracing::debug!(name = %pkg.name, "declared more than once");
                }
                declared.push(pkg.name);
            }
            Err(e) => env.reporter.warn(&format!("Warning! {e}. Skips")),
        }
    }

    let plan = plan_prune(&installed, &declared, prune_links);
    for name in &plan.kept_links {
        env.reporter.info(&format!("\"{name}\" is symlink. Skip"));
    }
    for name in &plan.defined {
        env.reporter.info(&format!("\"{name}\" is configured"));
    }
    Ok(plan)
}

/// Remove each prunee, continuing past failures.
///
/// # Errors
///
/// Returns [`PackageError::Warning`] when some removals failed and
/// [`PackageError::OperationFailed`] when all of them did.
pub fn prune<V, F, R>(env: &PackageEnv<'_, V, F, R>, prunees: &[String]) -> Result<BulkTally>
where
    V: VersionControl,
    F: PackageFs,
    R: ProgressReporter,
{
    let mut tally = BulkTally::default();
    for name in prunees {
        match remove_package(env, name) {
            Ok(()) => tally.succeeded += 1,
            Err(e) => {
                env.reporter.error(&format!("{e:#}"));
                tally.failed += 1;
            }
        }
    }
    tracing::debug!(?tally, "prune finished");

    match tally.verdict() {
        BulkVerdict::Clean => Ok(tally),
        BulkVerdict::Partial => Err(PackageError::Warning("There are some errors".to_string()).into()),
        BulkVerdict::Failed => Err(PackageError::OperationFailed("Prune failed".to_string()).into()),
    }
}
