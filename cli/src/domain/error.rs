//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Package errors ────────────────────────────────────────────────────────────

/// Errors raised while resolving, installing, or removing packages.
///
/// Each variant maps onto one class of outcome: argument errors are raised
/// before any I/O, `AlreadyInstalled` is tolerated by bulk operations,
/// `Warning` marks a degraded success and `Canceled` is not a failure at all.
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("Given argument \"{0}\" does not look like a valid repository")]
    InvalidSpecifier(String),

    #[error("Given argument \"{0}\" does not look like a valid package name")]
    InvalidName(String),

    #[error("\"{0}\" is already installed")]
    AlreadyInstalled(String),

    #[error("\"{0}\" is not installed")]
    NotInstalled(String),

    #[error("\"{0}\" does not exist")]
    PathNotFound(String),

    #[error("No package is installed")]
    NoPackages,

    #[error("{0}")]
    Canceled(String),

    #[error("{0}")]
    Warning(String),

    #[error("{0}")]
    OperationFailed(String),
}

impl PackageError {
    /// Stable machine-readable code used by `--json` error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSpecifier(_) | Self::InvalidName(_) | Self::PathNotFound(_) => {
                "invalid_argument"
            }
            Self::AlreadyInstalled(_) => "already_installed",
            Self::NotInstalled(_) => "not_installed",
            Self::NoPackages => "no_package",
            Self::Canceled(_) => "canceled",
            Self::Warning(_) => "warning",
            Self::OperationFailed(_) => "operation_failed",
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to locating and parsing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Load config failed. path: {path}, error: {reason}")]
    Malformed { path: String, reason: String },

    #[error("Cannot determine home directory")]
    NoHomeDir,

    #[error("Can't resolve root directory \"{path}\": {reason}")]
    InvalidRoot { path: String, reason: String },
}
