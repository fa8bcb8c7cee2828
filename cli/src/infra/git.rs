//! Git infrastructure — implements `VersionControl` with the `git` CLI.
//!
//! Every command addresses its working tree with `git -C <dir>`, so the
//! process working directory is never changed.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{CloneOptions, CommandRunner, VersionControl};
use crate::domain::Worktree;
use crate::domain::worktree::default_branch_from_symref;

/// Env var overriding the git executable.
pub const GIT_COMMAND_VAR: &str = "GIT_COMMAND";

/// `VersionControl` over the `git` executable.
pub struct GitClient<R: CommandRunner> {
    runner: R,
    program: String,
}

impl<R: CommandRunner> GitClient<R> {
    #[must_use]
    pub fn new(runner: R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    /// Use `$GIT_COMMAND` when set and non-empty, else `git`.
    #[must_use]
    pub fn from_env(runner: R) -> Self {
        let program = std::env::var(GIT_COMMAND_VAR)
            .ok()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "git".to_string());
        Self::new(runner, program)
    }

    fn with_dir<'a>(dir: Option<&'a str>, args: &[&'a str]) -> Vec<&'a str> {
        let mut full = Vec::with_capacity(args.len() + 2);
        if let Some(dir) = dir {
            full.extend(["-C", dir]);
        }
        full.extend_from_slice(args);
        full
    }

    /// Run a mutating command. Verbose runs stream to the terminal.
    async fn exec(&self, dir: Option<&Path>, args: &[&str], verbose: bool) -> Result<()> {
        let dir = dir.map(|d| d.to_string_lossy().into_owned());
        let full = Self::with_dir(dir.as_deref(), args);
        tracing::debug!(program = %self.program, args = ?full, "git");

        if verbose {
            let status = self.runner.run_status(&self.program, &full).await?;
            anyhow::ensure!(status.success(), "git {} failed ({status})", args.join(" "));
            return Ok(());
        }

        let output = self.runner.run(&self.program, &full).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "git {} failed ({}): {}",
                args.join(" "),
                output.status,
                stderr.trim()
            );
        }
        Ok(())
    }

    /// Run a query and return its trimmed stdout, or `None` on a non-zero
    /// exit.
    async fn query(&self, dir: &Path, args: &[&str]) -> Result<Option<String>> {
        let dir = dir.to_string_lossy();
        let full = Self::with_dir(Some(&*dir), args);
        tracing::debug!(program = %self.program, args = ?full, "git");

        let output = self.runner.run(&self.program, &full).await?;
        if !output.status.success() {
            tracing::debug!(status = %output.status, args = ?args, "git query failed");
            return Ok(None);
        }
        Ok(Some(
            String::from_utf8_lossy(&output.stdout)
                .trim_end_matches(['\r', '\n'])
                .to_string(),
        ))
    }

    /// `query`, with a failed command read as empty.
    async fn read(&self, dir: &Path, args: &[&str]) -> Result<String> {
        Ok(self.query(dir, args).await?.unwrap_or_default())
    }
}

impl<R: CommandRunner> VersionControl for GitClient<R> {
    async fn clone_repo(&self, url: &str, dest: &Path, opts: &CloneOptions<'_>) -> Result<()> {
        let branch = match opts.git_ref {
            Some(r) if !opts.is_commit_hash => Some(format!("--branch={r}")),
            _ => None,
        };
        let dest_str = dest.to_string_lossy();

        let mut args = vec!["clone", url];
        if let Some(branch) = branch.as_deref() {
            args.push(branch);
        }
        if opts.shallow && !opts.is_commit_hash {
            args.push("--depth=1");
        }
        args.push(&*dest_str);
        self.exec(None, &args, opts.verbose).await?;

        if let (Some(commit), true) = (opts.git_ref, opts.is_commit_hash) {
            self.exec(Some(dest), &["checkout", "--quiet", commit], opts.verbose)
                .await
                .with_context(|| format!("checking out {commit}"))?;
        }
        Ok(())
    }

    async fn pull(&self, dir: &Path, verbose: bool) -> Result<()> {
        self.exec(Some(dir), &["pull"], verbose).await
    }

    async fn has_update(&self, dir: &Path, verbose: bool) -> Result<bool> {
        self.exec(Some(dir), &["fetch"], verbose)
            .await
            .context("git fetch failed")?;

        if self
            .query(dir, &["symbolic-ref", "--short", "--quiet", "HEAD"])
            .await?
            .is_none()
        {
            // Detached HEAD has no upstream to compare with.
            return Ok(false);
        }

        let count = self
            .query(dir, &["rev-list", "--count", "HEAD...HEAD@{upstream}"])
            .await?
            .ok_or_else(|| anyhow::anyhow!("cannot compare {} with its upstream", dir.display()))?;
        let count: u64 = count
            .trim()
            .parse()
            .with_context(|| format!("unexpected rev-list output: {count:?}"))?;
        Ok(count > 0)
    }

    async fn worktree(&self, dir: &Path, _verbose: bool) -> Result<Worktree> {
        let remote_url = self.read(dir, &["config", "--get", "remote.origin.url"]).await?;
        let branch = self.read(dir, &["symbolic-ref", "--short", "--quiet", "HEAD"]).await?;
        let tag = self.read(dir, &["tag", "--points-at", "HEAD"]).await?;
        let head = self.read(dir, &["rev-parse", "--verify", "--quiet", "HEAD"]).await?;
        let symref = self
            .read(dir, &["symbolic-ref", "--short", "--quiet", "refs/remotes/origin/HEAD"])
            .await?;

        Ok(Worktree {
            remote_url,
            branch,
            // First tag only when several point at HEAD.
            tag: tag.lines().next().unwrap_or_default().to_string(),
            default_branch: default_branch_from_symref(&symref),
            head,
        })
    }
}
