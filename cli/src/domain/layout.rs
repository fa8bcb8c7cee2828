//! Directory layout under the shelp root.

use std::path::{Path, PathBuf};

use crate::domain::config::CONFIG_FILE_NAME;

/// Paths derived from the root directory `R`:
/// `R/packages/<name>`, `R/bin/<basename>`, `R/tmp/`, `R/config.yml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn packages_dir(&self) -> PathBuf {
        self.root.join("packages")
    }

    #[must_use]
    pub fn bin_dir(&self) -> PathBuf {
        self.root.join("bin")
    }

    /// Staging area for clones; lives on the same filesystem as `packages/`
    /// so the final move is a rename.
    #[must_use]
    pub fn temp_dir(&self) -> PathBuf {
        self.root.join("tmp")
    }

    #[must_use]
    pub fn package_path(&self, name: &str) -> PathBuf {
        self.packages_dir().join(name)
    }

    #[must_use]
    pub fn default_config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }
}
