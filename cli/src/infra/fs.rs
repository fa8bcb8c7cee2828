//! Filesystem infrastructure — implements `PackageFs` on the local disk.
//!
//! Top-level symlinks are never followed when inspecting or removing a path:
//! a pseudo-install is a link to a directory the user owns.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::{DirEntryInfo, PackageFs};

/// Production filesystem implementation of `PackageFs`.
pub struct LocalFs;

#[cfg(unix)]
fn has_exec_bit(meta: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn has_exec_bit(_meta: &std::fs::Metadata) -> bool {
    true
}

impl PackageFs for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.symlink_metadata().is_ok()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        path.symlink_metadata()
            .is_ok_and(|m| m.file_type().is_symlink())
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("creating directory {}", path.display()))
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntryInfo>> {
        let reader =
            std::fs::read_dir(path).with_context(|| format!("reading directory {}", path.display()))?;
        let mut entries = Vec::new();
        for entry in reader {
            let entry = entry.with_context(|| format!("reading directory {}", path.display()))?;
            let path = entry.path();
            entries.push(DirEntryInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_symlink: self.is_symlink(&path),
                is_executable_file: self.is_executable_file(&path),
                path,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn remove_all(&self, path: &Path) -> Result<()> {
        if self.is_symlink(path) || !path.is_dir() {
            std::fs::remove_file(path).with_context(|| format!("removing {}", path.display()))
        } else {
            std::fs::remove_dir_all(path)
                .with_context(|| format!("removing directory {}", path.display()))
        }
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        std::fs::remove_file(path).with_context(|| format!("removing file {}", path.display()))
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        std::fs::rename(from, to)
            .with_context(|| format!("renaming {} to {}", from.display(), to.display()))
    }

    #[cfg(unix)]
    fn symlink(&self, target: &Path, link: &Path) -> Result<()> {
        std::os::unix::fs::symlink(target, link)
            .with_context(|| format!("creating symlink {} -> {}", link.display(), target.display()))
    }

    #[cfg(not(unix))]
    fn symlink(&self, target: &Path, link: &Path) -> Result<()> {
        anyhow::bail!(
            "symbolic links are not supported on this platform: {} -> {}",
            link.display(),
            target.display()
        )
    }

    fn read_link(&self, path: &Path) -> Result<PathBuf> {
        std::fs::read_link(path).with_context(|| format!("reading link {}", path.display()))
    }

    fn is_executable_file(&self, path: &Path) -> bool {
        std::fs::metadata(path).is_ok_and(|m| m.is_file() && has_exec_bit(&m))
    }

    fn staging_dir(&self, parent: &Path, prefix: &str) -> Result<(PathBuf, Box<dyn std::any::Any>)> {
        let dir = tempfile::Builder::new()
            .prefix(&format!("{prefix}."))
            .tempdir_in(parent)
            .with_context(|| format!("creating staging directory in {}", parent.display()))?;
        let path = dir.path().to_path_buf();
        Ok((path, Box::new(dir)))
    }
}
