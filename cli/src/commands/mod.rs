//! Command implementations
//!
//! One module per subcommand. Handlers take `&AppContext`, print through
//! `app.output`, and return the process exit code; failures propagate as
//! errors and are mapped to exit codes in `cli::report_error`.

pub mod bundle;
pub mod destroy;
pub mod init;
pub mod install;
pub mod link;
pub mod list;
pub mod outdated;
pub mod prune;
pub mod remove;
pub mod upgrade;

use std::process::ExitCode;

/// Exit status for a degraded success.
pub const EXIT_WARNING: u8 = 3;

/// `SUCCESS`, or [`EXIT_WARNING`] when `degraded`.
#[must_use]
pub fn finish(degraded: bool) -> ExitCode {
    if degraded {
        ExitCode::from(EXIT_WARNING)
    } else {
        ExitCode::SUCCESS
    }
}
