//! `shelp link <path> [<package-name>]` — pseudo-install a local directory.

use std::path::{Component, Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::services::pseudo;
use crate::commands::finish;
use crate::domain::PackageError;

/// Arguments for the link command.
#[derive(Args)]
pub struct LinkArgs {
    /// Directory to link
    pub path: PathBuf,

    /// Package name (defaults to the directory name)
    pub name: Option<String>,
}

/// Absolute form of `path` with `.` and `..` resolved lexically. Symlinks
/// are kept.
fn absolute(path: &Path) -> Result<PathBuf> {
    let abs = std::path::absolute(path)
        .with_context(|| format!("Can't resolve path of \"{}\"", path.display()))?;
    let mut normalized = PathBuf::new();
    for component in abs.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

/// Run `shelp link`.
///
/// # Errors
///
/// Returns [`PackageError::PathNotFound`] for a missing source, and any
/// pseudo-install failure.
pub fn run(args: &LinkArgs, app: &AppContext) -> Result<ExitCode> {
    if std::fs::symlink_metadata(&args.path).is_err() {
        return Err(PackageError::PathNotFound(args.path.display().to_string()).into());
    }
    let source = absolute(&args.path)?;

    let reporter = app.terminal_reporter();
    let (_, report) = pseudo::link_local(&app.env(&reporter), &source, args.name.as_deref())?;
    Ok(finish(report.is_degraded()))
}
