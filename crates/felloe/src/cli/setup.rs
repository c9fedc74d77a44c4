use clap::{Args, CommandFactory};
use felloe_platform::shell::{self, Shell};

use super::App;
use crate::context::Context;

#[derive(Debug, Args)]
pub struct EnvArgs {
    /// Shell syntax to print [default: detected]
    #[arg(long)]
    pub shell: Option<Shell>,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell [default: detected]
    pub shell: Option<clap_complete::Shell>,
}

pub fn env(ctx: &Context, args: EnvArgs) -> anyhow::Result<()> {
    let shell = args
        .shell
        .or_else(shell::detect)
        .ok_or_else(|| anyhow::anyhow!("could not detect the shell; pass --shell"))?;
    println!("{}", shell.prepend_path(&ctx.layout.bin_dir()));
    Ok(())
}

pub fn completions(args: &CompletionsArgs) -> anyhow::Result<()> {
    let shell = match args.shell {
        Some(shell) => shell,
        None => shell::detect()
            .and_then(to_clap_shell)
            .ok_or_else(|| anyhow::anyhow!("could not detect a supported shell; name one explicitly"))?,
    };
    clap_complete::generate(shell, &mut App::command(), "felloe", &mut std::io::stdout());
    Ok(())
}

fn to_clap_shell(shell: Shell) -> Option<clap_complete::Shell> {
    match shell {
        Shell::Bash => Some(clap_complete::Shell::Bash),
        Shell::Zsh => Some(clap_complete::Shell::Zsh),
        Shell::Fish => Some(clap_complete::Shell::Fish),
        Shell::Powershell => Some(clap_complete::Shell::PowerShell),
        Shell::Elvish => Some(clap_complete::Shell::Elvish),
        _ => None,
    }
}
