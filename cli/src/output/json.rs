//! JSON output helpers.
//!
//! Provides the error-object formatter used by all `--json` code paths when
//! a command fails, and the `list --json` document.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::domain::InstalledEntry;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails (should not happen in
/// practice — `serde_json` only fails on non-finite floats and maps with
/// non-string keys, neither of which appear here).
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

#[derive(Serialize)]
struct ListedPackage<'a> {
    name: &'a str,
    /// Pseudo-installed with `link`.
    linked: bool,
}

/// Format installed packages as a JSON array of `{name, linked}`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_list(entries: &[InstalledEntry]) -> Result<String> {
    let list: Vec<ListedPackage<'_>> = entries
        .iter()
        .map(|e| ListedPackage {
            name: &e.name,
            linked: e.is_symlink,
        })
        .collect();
    serde_json::to_string_pretty(&list).context("JSON serialization failed")
}
