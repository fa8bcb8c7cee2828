//! `shelp init - [SHELL]` — print the shell integration script.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::domain::shell::Shell;

/// Arguments for the init command.
#[derive(Args)]
pub struct InitArgs {
    /// `-` prints the script; a shell name (bash, zsh, fish, sh) overrides `$SHELL`
    #[arg(allow_hyphen_values = true, value_name = "- | SHELL")]
    pub args: Vec<String>,
}

/// Basename this binary was invoked as.
fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|p| Path::new(p).file_name())
        .map_or_else(|| "shelp".to_string(), |n| n.to_string_lossy().into_owned())
}

/// Run `shelp init`.
///
/// # Errors
///
/// Never fails; the signature matches the other handlers.
pub fn run(args: &InitArgs, app: &AppContext) -> Result<ExitCode> {
    let mut print = false;
    let mut shell_name = std::env::var("SHELL").unwrap_or_default();
    for arg in &args.args {
        if arg == "-" {
            print = true;
        } else {
            shell_name.clone_from(arg);
        }
    }
    let shell = Shell::from_name(&shell_name);

    if print {
        app.output
            .line(shell.init_script(app.root(), &app.layout.bin_dir()).trim_end());
    } else {
        let has_bashrc = dirs::home_dir().is_some_and(|h| h.join(".bashrc").exists());
        eprintln!("Add the following line to {}:\n", shell.profile(has_bashrc));
        eprintln!("  {}", shell.init_command(&program_name()));
    }
    Ok(ExitCode::SUCCESS)
}
