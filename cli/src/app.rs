//! Application context — unified state passed to every command handler.
//!
//! `AppContext` is built once from the global flags: output settings, the
//! loaded configuration and the resolved root layout, and the production
//! adapters. Handlers borrow it and build a `PackageEnv` per operation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use console::Term;

use crate::application::services::PackageEnv;
use crate::domain::{Layout, ShelpConfig};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::{ConfigSources, YamlConfigStore};
use crate::infra::fs::LocalFs;
use crate::infra::git::GitClient;
use crate::output::{OutputContext, TerminalReporter};

/// Env var that, when present, makes every prompt take its default.
pub const YES_VAR: &str = "SHELP_YES";

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
    /// Stream git output and print details.
    pub verbose: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `SHELP_YES` env vars).
    pub yes: bool,
    /// Explicit configuration file.
    pub config: Option<PathBuf>,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    pub config: ShelpConfig,
    /// File `config` was read from.
    pub config_file: Option<PathBuf>,
    pub layout: Layout,
    pub git: GitClient<TokioCommandRunner>,
    pub fs: LocalFs,
    pub verbose: bool,
    /// `--yes` was passed.
    pub assume_yes: bool,
    /// When `true`, skip interactive prompts and use defaults.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `SHELP_YES`
    /// environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or no root
    /// directory can be determined.
    pub fn new(flags: AppFlags) -> Result<Self> {
        let ci_env = std::env::var_os("CI").is_some() || std::env::var_os(YES_VAR).is_some();
        let non_interactive = flags.behaviour.yes || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let loaded = YamlConfigStore::new(ConfigSources::from_env(flags.behaviour.config)).load()?;
        let timeout = Duration::from_secs(loaded.config.git.timeout);

        Ok(Self {
            output: OutputContext::new(
                flags.output.no_color,
                flags.output.quiet,
                flags.output.verbose,
            ),
            mode,
            config: loaded.config,
            config_file: loaded.file,
            layout: loaded.layout,
            git: GitClient::from_env(TokioCommandRunner::new(timeout)),
            fs: LocalFs,
            verbose: flags.output.verbose,
            assume_yes: flags.behaviour.yes,
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Build a `TerminalReporter` for services.
    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    /// Everything a package service needs, with `reporter` for progress.
    #[must_use]
    pub fn env<'a>(
        &'a self,
        reporter: &'a TerminalReporter<'a>,
    ) -> PackageEnv<'a, GitClient<TokioCommandRunner>, LocalFs, TerminalReporter<'a>> {
        PackageEnv {
            layout: &self.layout,
            vcs: &self.git,
            fs: &self.fs,
            reporter,
            shallow: self.config.git.shallow,
            verbose: self.verbose,
        }
    }

    /// The root directory all packages live under.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.layout.root()
    }

    /// Whether a prompt can be shown at all.
    #[must_use]
    pub fn can_prompt(&self) -> bool {
        !self.non_interactive && Term::stdout().is_term() && Term::stderr().is_term()
    }

    /// Ask the user for confirmation.
    ///
    /// Returns `default` immediately when prompting is not possible (CI,
    /// `--yes`, `SHELP_YES`, or no terminal).
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails.
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if !self.can_prompt() {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
