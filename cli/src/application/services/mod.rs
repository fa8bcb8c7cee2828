//! Application services — use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports` — never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod installer;
pub mod linker;
pub mod maintenance;
pub mod pseudo;
pub mod reconciler;
pub mod remover;

use anyhow::Result;

use crate::application::ports::{DirEntryInfo, PackageFs, ProgressReporter, VersionControl};
use crate::domain::Layout;

/// Everything a package operation needs, passed explicitly to every service.
pub struct PackageEnv<'a, V, F, R> {
    pub layout: &'a Layout,
    pub vcs: &'a V,
    pub fs: &'a F,
    pub reporter: &'a R,
    /// Configured preference for `--depth=1` clones.
    pub shallow: bool,
    pub verbose: bool,
}

impl<V, F, R> PackageEnv<'_, V, F, R>
where
    V: VersionControl,
    F: PackageFs,
    R: ProgressReporter,
{
    /// Create `packages/`, `bin/` and `tmp/` under the root.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory cannot be created.
    pub fn prepare_directories(&self) -> Result<()> {
        for dir in [
            self.layout.packages_dir(),
            self.layout.bin_dir(),
            self.layout.temp_dir(),
        ] {
            self.fs.create_dir_all(&dir)?;
        }
        Ok(())
    }

    /// Entries of `packages/`, sorted by name. Empty when the directory is
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be read.
    pub fn installed_packages(&self) -> Result<Vec<DirEntryInfo>> {
        let dir = self.layout.packages_dir();
        if !self.fs.is_dir(&dir) {
            return Ok(Vec::new());
        }
        self.fs.list_dir(&dir)
    }
}
