//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};

use anyhow::Result;

use crate::domain::Worktree;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: std::time::Duration,
    ) -> Result<Output>;
    /// Run a program with inherited stdio and return only its exit status.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus>;
}

// ── Version Control Port ──────────────────────────────────────────────────────

/// Options for [`VersionControl::clone_repo`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CloneOptions<'a> {
    /// Branch, tag, or commit to check out after cloning.
    pub git_ref: Option<&'a str>,
    /// `git_ref` names a commit: clone the default branch, then check the
    /// commit out.
    pub is_commit_hash: bool,
    /// Clone with `--depth=1`. Must be `false` for commit hashes.
    pub shallow: bool,
    /// Stream the client's own output.
    pub verbose: bool,
}

/// The version-control client. Every query takes the working tree
/// explicitly; the process working directory is never changed.
#[allow(async_fn_in_trait)]
pub trait VersionControl {
    /// Clone `url` into `dest`, which must not exist yet.
    async fn clone_repo(&self, url: &str, dest: &Path, opts: &CloneOptions<'_>) -> Result<()>;
    /// Pull the upstream of the checked-out branch.
    async fn pull(&self, dir: &Path, verbose: bool) -> Result<()>;
    /// Fetch and report whether the upstream has commits `HEAD` lacks.
    /// A detached `HEAD` never has updates.
    async fn has_update(&self, dir: &Path, verbose: bool) -> Result<bool>;
    /// Read remote URL, branch, tag and default branch of a checkout.
    async fn worktree(&self, dir: &Path, verbose: bool) -> Result<Worktree>;
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// One directory entry, described without following a top-level symlink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    pub path: PathBuf,
    pub is_symlink: bool,
    /// Regular file (after following symlinks) with an executable bit set.
    pub is_executable_file: bool,
}

/// Raw filesystem primitives used by the package services.
pub trait PackageFs {
    /// True for anything at `path`, including dangling symlinks.
    fn exists(&self, path: &Path) -> bool;
    fn is_symlink(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    /// Entries of `path`, sorted by name.
    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntryInfo>>;
    /// Remove a directory tree, or just the link when `path` is a symlink.
    fn remove_all(&self, path: &Path) -> Result<()>;
    fn remove_file(&self, path: &Path) -> Result<()>;
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;
    fn symlink(&self, target: &Path, link: &Path) -> Result<()>;
    fn read_link(&self, path: &Path) -> Result<PathBuf>;
    fn is_executable_file(&self, path: &Path) -> bool;
    /// Create a fresh directory under `parent` for staging.
    ///
    /// Returns `(path, guard)`; dropping `guard` deletes the directory and
    /// anything still inside it.
    fn staging_dir(&self, parent: &Path, prefix: &str) -> Result<(PathBuf, Box<dyn std::any::Any>)>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
    /// Emit a detail only shown in verbose mode.
    fn info(&self, message: &str);
    /// Report a per-package failure that does not stop a bulk operation.
    fn error(&self, message: &str);
}
