use clap::Args;
use felloe_version::VersionRequest;

use crate::context::Context;
use crate::pin;

#[derive(Debug, Args)]
pub struct PinArgs {
    /// `latest`, a version like 3.14.0 or a prefix like 3.14
    #[arg(value_name = "VERSION")]
    pub request: VersionRequest,
}

pub fn pin(ctx: &Context, args: PinArgs) -> anyhow::Result<()> {
    let path = pin::write(&ctx.cwd, &ctx.config.pin_file, &args.request)?;
    eprintln!("pinned helm {} in {}", args.request, path.display());
    Ok(())
}
