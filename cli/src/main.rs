//! shelp - Git-based package manager for shell scripts

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use shelp_cli::cli::{Cli, report_error};
use shelp_cli::output::OutputContext;

/// Forces debug logging when set to a non-empty value.
const DEBUG_VAR: &str = "SHELP_DEBUG";
/// Log filter directives, `RUST_LOG` style.
const LOG_VAR: &str = "SHELP_LOG";

fn init_tracing(verbose: bool) {
    let debug = std::env::var(DEBUG_VAR).is_ok_and(|v| !v.is_empty());
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| {
            EnvFilter::new(if verbose { "warn,shelp_cli=debug" } else { "warn" })
        })
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = OutputContext::new(cli.no_color, cli.quiet, cli.verbose);
    let json = cli.json;
    match cli.run().await {
        Ok(code) => code,
        Err(e) => report_error(&output, json, &e),
    }
}
