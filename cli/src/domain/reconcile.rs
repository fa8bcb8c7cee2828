//! Set logic for bulk operations: prune candidates and bulk verdicts.
//!
//! Package name is the only join key between installed and declared sets.

use std::collections::BTreeSet;

/// One entry of `packages/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledEntry {
    pub name: String,
    pub is_symlink: bool,
}

/// Result of classifying installed packages against the declared set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrunePlan {
    /// Packages to remove, in installed order.
    pub prunees: Vec<String>,
    /// Installed packages that are declared.
    pub defined: Vec<String>,
    /// Pseudo-installs left alone because links are kept.
    pub kept_links: Vec<String>,
}

impl PrunePlan {
    /// Nothing to remove; prune reports "canceled".
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.prunees.is_empty()
    }
}

/// Classify installed packages into prunees, defined, and kept links.
///
/// Symlinked packages are only candidates when `prune_links` is set.
/// Duplicate declared names count once.
#[must_use]
pub fn plan_prune(
    installed: &[InstalledEntry],
    declared_names: &[String],
    prune_links: bool,
) -> PrunePlan {
    let declared: BTreeSet<&str> = declared_names.iter().map(String::as_str).collect();
    let mut plan = PrunePlan::default();
    for entry in installed {
        if entry.is_symlink && !prune_links {
            plan.kept_links.push(entry.name.clone());
        } else if declared.contains(entry.name.as_str()) {
            plan.defined.push(entry.name.clone());
        } else {
            plan.prunees.push(entry.name.clone());
        }
    }
    plan
}

/// Per-package success/failure counts of a bulk operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkTally {
    pub succeeded: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkVerdict {
    Clean,
    /// Some entries failed while others succeeded.
    Partial,
    Failed,
}

impl BulkTally {
    #[must_use]
    pub fn verdict(&self) -> BulkVerdict {
        match (self.succeeded, self.failed) {
            (_, 0) => BulkVerdict::Clean,
            (0, _) => BulkVerdict::Failed,
            _ => BulkVerdict::Partial,
        }
    }
}
