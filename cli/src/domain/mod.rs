//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod layout;
pub mod package;
pub mod plan;
pub mod reconcile;
pub mod shell;
pub mod worktree;

pub use config::{PackageEntry, ShelpConfig};
pub use error::{ConfigError, PackageError};
pub use layout::Layout;
pub use package::{InstalledState, PackageDescriptor, SpecifierArgs, validate_explicit_name};
pub use plan::{Existing, InstallPlan, plan_install};
pub use reconcile::{BulkTally, BulkVerdict, InstalledEntry, PrunePlan, plan_prune};
pub use worktree::Worktree;
