//! Install decision: what to do when a package name is requested.
//!
//! Pure policy. The installer service gathers the facts (`Existing`) and acts
//! on the returned [`InstallPlan`].

use crate::domain::package::{InstalledState, PackageDescriptor};

/// What currently occupies `packages/<name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Existing {
    Absent,
    /// Symlink created by `link`; never diffed by ref.
    PseudoInstall,
    /// A real clone and the identity read from its worktree.
    Clone(InstalledState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPlan {
    FreshInstall,
    Reinstall,
    AlreadySatisfied,
    /// Occupied by something else and overwrite was not requested.
    Conflict,
}

/// Decide between fresh install, reinstall, no-op and conflict.
///
/// `overwrite` is set by bulk install (`bundle`): pseudo-installs and
/// mismatched clones are replaced instead of reported.
#[must_use]
pub fn plan_install(
    requested: &PackageDescriptor,
    existing: &Existing,
    overwrite: bool,
) -> InstallPlan {
    match existing {
        Existing::Absent => InstallPlan::FreshInstall,
        Existing::PseudoInstall if overwrite => InstallPlan::Reinstall,
        Existing::PseudoInstall => InstallPlan::AlreadySatisfied,
        Existing::Clone(state) if requested.is_equivalent(state) => InstallPlan::AlreadySatisfied,
        Existing::Clone(_) if overwrite => InstallPlan::Reinstall,
        Existing::Clone(_) => InstallPlan::Conflict,
    }
}

/// Whether the clone must carry full history.
///
/// A commit hash can only be checked out from a full clone; `shallow` is the
/// configured preference for everything else.
#[must_use]
pub fn needs_full_clone(requested: &PackageDescriptor, shallow: bool) -> bool {
    requested.is_commit_hash || !shallow
}
