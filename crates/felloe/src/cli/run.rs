use std::ffi::OsString;
use std::process::ExitCode;

use clap::Args;
use felloe_version::VersionRequest;

use crate::context::Context;
use crate::exec;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Installed version or prefix
    #[arg(value_name = "VERSION")]
    pub request: VersionRequest,

    /// Arguments passed to helm
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<OsString>,
}

#[derive(Debug, Args)]
pub struct ExecArgs {
    /// Installed version or prefix
    #[arg(value_name = "VERSION")]
    pub request: VersionRequest,

    /// Command to run
    pub command: OsString,

    /// Arguments passed to the command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<OsString>,
}

pub async fn run(ctx: &Context, args: RunArgs) -> anyhow::Result<ExitCode> {
    let registry = ctx.registry()?;
    let version = super::resolve_installed(ctx, &registry, &args.request).await?;
    let binary = ctx.layout.binary_path(&version);
    let status = exec::run(&binary, &args.args)?;
    Ok(ExitCode::from(exec::exit_code(status)))
}

pub async fn exec(ctx: &Context, args: ExecArgs) -> anyhow::Result<ExitCode> {
    let registry = ctx.registry()?;
    let version = super::resolve_installed(ctx, &registry, &args.request).await?;
    let status = exec::exec(&ctx.layout.version_dir(&version), &args.command, &args.args)?;
    Ok(ExitCode::from(exec::exit_code(status)))
}
