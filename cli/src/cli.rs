//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands::{self, EXIT_WARNING};
use crate::domain::{ConfigError, PackageError};
use crate::output::{OutputContext, json};

/// Git-based package manager for shell scripts
#[derive(Parser)]
#[command(
    name = "shelp",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Configuration file (default: $SHELP_CONFIG or <root>/config.yml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Stream git output and show details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Skip confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print shell integration script
    Init(commands::init::InitArgs),

    /// Install a package from a git repository
    #[command(visible_alias = "add")]
    Install(commands::install::InstallArgs),

    /// Uninstall a package
    #[command(visible_alias = "uninstall")]
    Remove(commands::remove::RemoveArgs),

    /// Pseudo-install a local directory as a package
    Link(commands::link::LinkArgs),

    /// List installed packages
    List,

    /// Show packages which can be upgraded
    Outdated,

    /// Pull upstream changes of installed packages
    Upgrade(commands::upgrade::UpgradeArgs),

    /// Install every package declared in the config file
    Bundle,

    /// Uninstall packages not declared in the config file
    Prune(commands::prune::PruneArgs),

    /// Delete the root directory and everything in it
    Destroy,
}

impl Cli {
    /// Flags for constructing the `AppContext`.
    #[must_use]
    pub fn app_flags(&self) -> AppFlags {
        AppFlags {
            output: OutputFlags {
                no_color: self.no_color,
                quiet: self.quiet,
                json: self.json,
                verbose: self.verbose,
            },
            behaviour: BehaviourFlags {
                yes: self.yes,
                config: self.config.clone(),
            },
        }
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the command
    /// fails.
    pub async fn run(self) -> Result<ExitCode> {
        let app = AppContext::new(self.app_flags())?;
        match self.command {
            Command::Init(args) => commands::init::run(&args, &app),
            Command::Install(args) => commands::install::run(&args, &app).await,
            Command::Remove(args) => commands::remove::run(&args, &app),
            Command::Link(args) => commands::link::run(&args, &app),
            Command::List => commands::list::run(&app),
            Command::Outdated => commands::outdated::run(&app).await,
            Command::Upgrade(args) => commands::upgrade::run(&args, &app).await,
            Command::Bundle => commands::bundle::run(&app).await,
            Command::Prune(args) => commands::prune::run(&args, &app),
            Command::Destroy => commands::destroy::run(&app),
        }
    }
}

/// Exit status for a failed command.
///
/// `Canceled` is not a failure; `Warning` is a degraded success.
#[must_use]
pub fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<PackageError>() {
        Some(PackageError::Canceled(_)) => 0,
        Some(PackageError::Warning(_)) => EXIT_WARNING,
        _ => 1,
    }
}

/// Print `err` and map it to an exit code.
///
/// With `json`, failures are printed as a JSON error object on stdout.
#[must_use]
pub fn report_error(output: &OutputContext, json_mode: bool, err: &anyhow::Error) -> ExitCode {
    let status = exit_status(err);
    let package_err = err.downcast_ref::<PackageError>();
    let message = format!("{err:#}");

    match package_err {
        Some(PackageError::Canceled(msg)) => {
            if !json_mode {
                output.line(msg);
            }
        }
        Some(PackageError::Warning(msg)) if !json_mode => output.warn(msg),
        _ if json_mode => {
            let code = match package_err {
                Some(e) => e.code(),
                None if err.downcast_ref::<ConfigError>().is_some() => "config_error",
                None => "error",
            };
            match json::format_error(&message, code) {
                Ok(obj) => output.line(&obj),
                Err(_) => output.error(&message),
            }
        }
        _ => output.error(&message),
    }
    ExitCode::from(status)
}
