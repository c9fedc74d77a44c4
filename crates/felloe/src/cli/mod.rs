mod install;
mod ls;
mod pin;
mod remote;
mod rm;
mod run;
mod select;
mod setup;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use felloe_version::{Version, VersionRequest};

use crate::context::Context;
use crate::error::{Error, Result};
use crate::logging::LogLevel;
use crate::registry::Registry;

#[derive(Debug, Parser)]
#[command(
    name = "felloe",
    version,
    about = "The helm version manager",
    long_about = "The helm version manager\n\nRun without a command to pick an installed version interactively.",
    propagate_version = true
)]
pub struct App {
    /// Verbosity of diagnostics on stderr; RUST_LOG takes precedence
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn, env = "FELLOE_LOG")]
    pub log_level: LogLevel,

    /// Directory holding installed versions [default: <user data dir>/felloe]
    #[arg(long, global = true, value_name = "DIR", env = crate::layout::ROOT_ENV)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install a helm version and switch to it
    #[command(visible_alias = "i")]
    Install(install::InstallArgs),
    /// Switch to an installed helm version
    Use(install::UseArgs),
    /// List installed versions; `*` marks the active one
    #[command(visible_alias = "ls")]
    List(ls::ListArgs),
    /// Print the active version
    Current,
    /// Remove installed versions
    #[command(visible_aliases = ["rm", "remove"])]
    Uninstall(rm::UninstallArgs),
    /// Remove every installed version except the active one
    Prune,
    /// List published helm releases
    Versions(remote::VersionsArgs),
    /// Install and switch to the newest stable release
    Latest(remote::LatestArgs),
    /// Print the path of a version's helm binary
    Which(ls::WhichArgs),
    /// Run a specific version of helm
    Run(run::RunArgs),
    /// Run a command with a specific helm version first on PATH
    Exec(run::ExecArgs),
    /// Pin a version for the current directory
    Pin(pin::PinArgs),
    /// Print the shell line that puts felloe's helm on PATH
    Env(setup::EnvArgs),
    /// Print a shell completion script
    Completions(setup::CompletionsArgs),
}

impl App {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        if let Some(Commands::Completions(args)) = &self.command {
            setup::completions(args)?;
            return Ok(ExitCode::SUCCESS);
        }

        let ctx = Context::load(self.root)?;
        let Some(command) = self.command else {
            select::select(&ctx)?;
            return Ok(ExitCode::SUCCESS);
        };
        match command {
            Commands::Install(args) => install::install(&ctx, args).await?,
            Commands::Use(args) => install::use_version(&ctx, args).await?,
            Commands::List(args) => ls::list(&ctx, args)?,
            Commands::Current => ls::current(&ctx)?,
            Commands::Uninstall(args) => rm::uninstall(&ctx, args)?,
            Commands::Prune => rm::prune(&ctx)?,
            Commands::Versions(args) => remote::versions(&ctx, args).await?,
            Commands::Latest(args) => remote::latest(&ctx, args).await?,
            Commands::Which(args) => ls::which(&ctx, args).await?,
            Commands::Run(args) => return Ok(run::run(&ctx, args).await?),
            Commands::Exec(args) => return Ok(run::exec(&ctx, args).await?),
            Commands::Pin(args) => pin::pin(&ctx, args)?,
            Commands::Env(args) => setup::env(&ctx, args)?,
            Commands::Completions(_) => {}
        }
        Ok(ExitCode::SUCCESS)
    }
}

/// Resolves `request` without consulting the network and requires the result
/// to be installed.
async fn resolve_installed(ctx: &Context, registry: &Registry, request: &VersionRequest) -> Result<Version> {
    let resolver = ctx.resolver(registry, None);
    let version = match resolver.expand(request)? {
        VersionRequest::Exact(version) => version,
        other => resolver.resolve(&other).await?,
    };
    if !registry.exists(&version) {
        return Err(Error::NotInstalled(version));
    }
    Ok(version)
}
