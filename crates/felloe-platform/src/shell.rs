//! Shell detection and snippets.

use crate::error::Error;
use query_shell::Shell as QueryShell;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
    Elvish,
    Nushell,
    Xonsh,
    Ion,
}

fn from_query_shell(qs: QueryShell) -> Option<Shell> {
    match qs {
        QueryShell::Bash => Some(Shell::Bash),
        QueryShell::Zsh => Some(Shell::Zsh),
        QueryShell::Fish => Some(Shell::Fish),
        QueryShell::Powershell => Some(Shell::Powershell),
        QueryShell::Elvish => Some(Shell::Elvish),
        QueryShell::Nushell => Some(Shell::Nushell),
        QueryShell::Xonsh => Some(Shell::Xonsh),
        QueryShell::Ion => Some(Shell::Ion),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

/// The shell running the current process, if it can be identified.
pub fn detect() -> Option<Shell> { query_shell::get_shell().ok().and_then(from_query_shell) }

impl Shell {
    pub fn name(self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::Zsh => "zsh",
            Self::Fish => "fish",
            Self::Powershell => "powershell",
            Self::Elvish => "elvish",
            Self::Nushell => "nu",
            Self::Xonsh => "xonsh",
            Self::Ion => "ion",
        }
    }

    /// A line that puts `dir` first on `PATH` when evaluated by this shell.
    pub fn prepend_path(self, dir: &Path) -> String {
        let dir = dir.display();
        match self {
            Self::Bash | Self::Zsh | Self::Ion => format!("export PATH=\"{dir}:$PATH\""),
            Self::Fish => format!("set -gx PATH \"{dir}\" $PATH"),
            Self::Powershell => format!("$env:PATH = \"{dir}\" + [IO.Path]::PathSeparator + $env:PATH"),
            Self::Elvish => format!("set paths = [\"{dir}\" $@paths]"),
            Self::Nushell => format!("$env.PATH = ($env.PATH | prepend \"{dir}\")"),
            Self::Xonsh => format!("$PATH.insert(0, \"{dir}\")"),
        }
    }
}

impl FromStr for Shell {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bash" => Ok(Self::Bash),
            "zsh" => Ok(Self::Zsh),
            "fish" => Ok(Self::Fish),
            "powershell" | "pwsh" => Ok(Self::Powershell),
            "elvish" => Ok(Self::Elvish),
            "nu" | "nushell" => Ok(Self::Nushell),
            "xonsh" => Ok(Self::Xonsh),
            "ion" => Ok(Self::Ion),
            other => Err(Error::UnknownShell(other.to_string())),
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}
