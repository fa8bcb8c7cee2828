//! Output formatting module
//!
//! Results go to stdout; progress, warnings and errors go to stderr so that
//! `list` and `outdated` stay pipeable.

pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;
pub use reporter::TerminalReporter;
pub use styles::Styles;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stderr is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print `info` details.
    pub verbose: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool, verbose: bool) -> Self {
        let is_tty = Term::stderr().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
            verbose,
        }
    }

    /// Spinners only when nothing else writes to the terminal.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet && !self.verbose
    }

    /// Print a result line to stdout, unstyled. Never suppressed.
    pub fn line(&self, msg: &str) {
        println!("{msg}");
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a progress step prefixed with `→` to stderr. Suppressed when
    /// `quiet`.
    pub fn step(&self, msg: &str) {
        if !self.quiet {
            eprintln!("{} {msg}", "→".style(self.styles.dim));
        }
    }

    /// Print a warning message prefixed with `⚠` to stderr. Suppressed when
    /// `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            eprintln!("{} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("{} {msg}", "✗".style(self.styles.error));
    }

    /// Print a detail prefixed with `ℹ` to stderr. Only when `verbose`.
    pub fn info(&self, msg: &str) {
        if self.verbose && !self.quiet {
            eprintln!("{} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.style(self.styles.header));
        }
    }
}
