//! Application service — executable symlinks in the shared `bin/` directory.
//!
//! Symlinks are keyed by executable basename and point into the package
//! directory under `packages/`. Ownership is never recorded: a symlink
//! belongs to a package when its target lies under the package path.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{PackageFs, ProgressReporter, VersionControl};
use crate::application::services::PackageEnv;

/// Outcome of linking one package's executables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    /// Basenames now linked to this package.
    pub linked: Vec<String>,
    /// Basenames already taken by an unrelated entry in `bin/`.
    pub collisions: Vec<String>,
}

impl LinkReport {
    /// Completed, but at least one executable was not exposed.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.collisions.is_empty()
    }
}

/// Link one executable as `bin/<basename>`.
///
/// An existing entry of that name is left untouched and recorded as a
/// collision, unless it already points at `binary`.
///
/// # Errors
///
/// Returns an error for any filesystem failure other than a name collision.
pub fn link_executable<V, F, R>(
    env: &PackageEnv<'_, V, F, R>,
    binary: &Path,
    report: &mut LinkReport,
) -> Result<()>
where
    V: VersionControl,
    F: PackageFs,
    R: ProgressReporter,
{
    let Some(basename) = binary.file_name() else {
        anyhow::bail!("{} has no file name", binary.display());
    };
    let name = basename.to_string_lossy().into_owned();
    let link = env.layout.bin_dir().join(basename);

    if env.fs.exists(&link) {
        if env.fs.is_symlink(&link) && env.fs.read_link(&link).is_ok_and(|t| t == binary) {
            tracing::debug!(link = %link.display(), "already linked");
            report.linked.push(name);
            return Ok(());
        }
        env.reporter
            .warn(&format!("Warning! {} already exists. Skip linking", link.display()));
        report.collisions.push(name);
        return Ok(());
    }

    env.fs
        .symlink(binary, &link)
        .with_context(|| format!("linking {} -> {}", link.display(), binary.display()))?;
    tracing::debug!(link = %link.display(), target = %binary.display(), "linked executable");
    report.linked.push(name);
    Ok(())
}

/// Link every executable regular file directly inside `package_dir/bin`,
/// or directly inside `package_dir` when it has no `bin/`.
///
/// # Errors
///
/// Returns an error if the source directory cannot be read or a link cannot
/// be created for a reason other than a name collision.
pub fn link_all_executables<V, F, R>(
    env: &PackageEnv<'_, V, F, R>,
    package_dir: &Path,
) -> Result<LinkReport>
where
    V: VersionControl,
    F: PackageFs,
    R: ProgressReporter,
{
    let bin = package_dir.join("bin");
    let source = if env.fs.is_dir(&bin) { bin } else { package_dir.to_path_buf() };

    let mut report = LinkReport::default();
    for entry in env.fs.list_dir(&source)? {
        if entry.is_executable_file {
            link_executable(env, &entry.path, &mut report)?;
        }
    }
    Ok(report)
}

/// Link an explicit list of executables, relative to `package_dir`.
///
/// # Errors
///
/// Returns an error if a listed executable does not exist or a link cannot
/// be created for a reason other than a name collision.
pub fn link_listed_executables<V, F, R>(
    env: &PackageEnv<'_, V, F, R>,
    package_dir: &Path,
    bins: &[String],
) -> Result<LinkReport>
where
    V: VersionControl,
    F: PackageFs,
    R: ProgressReporter,
{
    let mut report = LinkReport::default();
    for bin in bins {
        let binary = package_dir.join(bin);
        if !env.fs.exists(&binary) {
            anyhow::bail!("executable not found: {}", binary.display());
        }
        link_executable(env, &binary, &mut report)?;
    }
    Ok(report)
}

/// Remove every symlink in `bin/` whose target lies under `package_dir`.
///
/// Returns the number of links removed. Unreadable links are skipped.
///
/// # Errors
///
/// Returns an error if `bin/` cannot be listed or a matching link cannot be
/// removed.
pub fn unlink_package_executables<V, F, R>(
    env: &PackageEnv<'_, V, F, R>,
    package_dir: &Path,
) -> Result<usize>
where
    V: VersionControl,
    F: PackageFs,
    R: ProgressReporter,
{
    let bin_dir = env.layout.bin_dir();
    if !env.fs.is_dir(&bin_dir) {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in env.fs.list_dir(&bin_dir)? {
        if !entry.is_symlink {
            continue;
        }
        let target = match env.fs.read_link(&entry.path) {
            Ok(target) => target,
            Err(e) => {
                tracing::warn!(link = %entry.path.display(), error = %e, "failed to read link");
                continue;
            }
        };
        if target.starts_with(package_dir) {
            env.fs
                .remove_file(&entry.path)
                .with_context(|| format!("deleting {}", entry.path.display()))?;
            tracing::debug!(link = %entry.path.display(), target = %target.display(), "unlinked");
            removed += 1;
        }
    }
    Ok(removed)
}
