//! Shell integration scripts printed by `shelp init -`.

use std::path::Path;

use crate::domain::config::ROOT_VAR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    /// Any other POSIX-compatible shell.
    Posix,
}

impl Shell {
    /// Map a shell name or path (`$SHELL`) to a flavour.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let base = Path::new(name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(name);
        match base {
            "bash" => Self::Bash,
            "zsh" => Self::Zsh,
            "fish" => Self::Fish,
            _ => Self::Posix,
        }
    }

    /// Profile file the user should edit. `has_bashrc` picks between the
    /// two bash conventions.
    #[must_use]
    pub fn profile(self, has_bashrc: bool) -> &'static str {
        match self {
            Self::Bash if has_bashrc => "~/.bashrc",
            Self::Bash => "~/.bash_profile",
            Self::Zsh => "~/.zshrc",
            Self::Fish => "~/.config/fish/config.fish",
            Self::Posix => "its profile",
        }
    }

    /// Line to append to the profile.
    #[must_use]
    pub fn init_command(self, prog: &str) -> String {
        match self {
            Self::Fish => format!("{prog} init - | source"),
            _ => format!("eval \"$({prog} init -)\""),
        }
    }

    /// Script exporting the root, prepending `bin/` to `PATH`, and defining
    /// `include <package> <file>`.
    #[must_use]
    pub fn init_script(self, root: &Path, bin: &Path) -> String {
        let root = root.display();
        let bin = bin.display();
        match self {
            Self::Fish => format!(
                r#"set -gx {ROOT_VAR} {root}
if not contains {bin} $PATH
  set -gx PATH {bin} $PATH
end

# Load script in a package
function include
  set package $argv[1]
  set file $argv[2]

  if test -z "$package" -o -z "$file"
    echo "Usage: include <package> <file>" >&2
    return 1
  end

  if test ! -e "${ROOT_VAR}/packages/$package"
    echo "Package not installed: $package" >&2
    return 1
  end

  if test -e "${ROOT_VAR}/packages/$package/$file"
    source "${ROOT_VAR}/packages/$package/$file" >&2
  else
    echo "File not found: ${ROOT_VAR}/packages/$package/$file" >&2
    return 1
  end
end
"#
            ),
            _ => format!(
                r#"export {ROOT_VAR}="{root}"
PATH="{bin}:${{PATH}}"

# Load script in a package
include() {{
  _package="$1"
  _file="$2"

  if [ -z "${{_package}}" ] || [ -z "${{_file}}" ]; then
    echo "Usage: include <package> <file>" >&2
    unset _package _file
    return 1
  fi

  if [ ! -e "${{{ROOT_VAR}}}/packages/${{_package}}" ]; then
    echo "Package not installed: ${{_package}}" >&2
    unset _package _file
    return 1
  fi

  if [ -e "${{{ROOT_VAR}}}/packages/${{_package}}/${{_file}}" ]; then
    . "${{{ROOT_VAR}}}/packages/${{_package}}/${{_file}}" >&2
    unset _package _file
  else
    echo "File not found: ${{{ROOT_VAR}}}/packages/${{_package}}/${{_file}}" >&2
    unset _package _file
    return 1
  fi
}}
"#
            ),
        }
    }
}
