//! Domain types for the shelp configuration file.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::package::SpecifierArgs;

// ── Constants ────────────────────────────────────────────────────────────────

/// Env var naming an explicit configuration file.
pub const CONFIG_VAR: &str = "SHELP_CONFIG";
/// Env var naming the root directory.
pub const ROOT_VAR: &str = "SHELP_ROOT";
/// Config file name looked up inside the root directory.
pub const CONFIG_FILE_NAME: &str = "config.yml";
/// Seconds a single git invocation may run before it is killed.
pub const DEFAULT_GIT_TIMEOUT_SECS: u64 = 600;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `<root>/config.yml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ShelpConfig {
    pub path: PathConfig,
    pub git: GitConfig,
    /// Declared packages, in file order.
    pub packages: Vec<PackageEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PathConfig {
    /// Root directory; `~/` is expanded against the home directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

/// Git behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Use `--depth=1` clones when the ref allows it.
    pub shallow: bool,
    /// Per-invocation timeout in seconds.
    pub timeout: u64,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            shallow: true,
            timeout: DEFAULT_GIT_TIMEOUT_SECS,
        }
    }
}

/// One declared package (`from/as/at/bin`).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PackageEntry {
    pub from: String,
    #[serde(rename = "as", skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(rename = "at", skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
    /// Executables to link, relative to the package directory.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bin: Vec<String>,
}

impl PackageEntry {
    /// Inputs for the Specifier Parser.
    #[must_use]
    pub fn specifier(&self) -> SpecifierArgs<'_> {
        SpecifierArgs {
            from: &self.from,
            name: self.alias.as_deref(),
            at: self.pin.as_deref(),
        }
    }
}

/// Expand a leading `~/` against `home`.
#[must_use]
pub fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match home {
        Some(home) if path == "~" => home.to_path_buf(),
        Some(home) => path
            .strip_prefix("~/")
            .map_or_else(|| PathBuf::from(path), |rest| home.join(rest)),
        None => PathBuf::from(path),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
