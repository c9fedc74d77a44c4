use clap::Args;
use felloe_version::VersionRequest;

use crate::activation::{self, Activator};
use crate::context::Context;
use crate::error::Error;
use crate::ui::table::{self, FormatConfig, InstalledRow};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Print version numbers only
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(Debug, Args)]
pub struct WhichArgs {
    /// Installed version or prefix [default: pinned version]
    #[arg(value_name = "VERSION")]
    pub request: Option<VersionRequest>,
}

pub fn list(ctx: &Context, args: ListArgs) -> anyhow::Result<()> {
    let registry = ctx.registry()?;
    let current = match Activator::new(&registry).current() {
        Ok(current) => current,
        Err(e) => {
            tracing::warn!("{e}");
            None
        }
    };

    if registry.is_empty() {
        eprintln!("no helm versions installed");
        return Ok(());
    }

    if args.quiet {
        for version in registry.versions() {
            println!("{version}");
        }
        return Ok(());
    }

    let rows = registry.list().into_iter().map(|installed| InstalledRow {
        marker:       if current.as_ref() == Some(&installed.version) { "*" } else { "" },
        version:      installed.version.to_string(),
        installed_at: installed.installed_at.format("%Y-%m-%d %H:%M").to_string(),
        path:         installed.path.display().to_string(),
    });
    println!("{}", table::render(rows, FormatConfig::default()));
    Ok(())
}

pub fn current(ctx: &Context) -> anyhow::Result<()> {
    match activation::read_current(&ctx.layout)? {
        Some(version) => println!("{version}"),
        None => {
            return Err(Error::NoVersionSelected {
                pin_file: ctx.config.pin_file.clone(),
                cwd:      ctx.cwd.clone(),
            }
            .into());
        }
    }
    Ok(())
}

/// Prints the helm binary of a version, then its tiller if it ships one.
pub async fn which(ctx: &Context, args: WhichArgs) -> anyhow::Result<()> {
    let request = args.request.unwrap_or(VersionRequest::ProjectPinned);
    let registry = ctx.registry()?;
    let version = super::resolve_installed(ctx, &registry, &request).await?;
    let path = registry
        .get(&version)
        .map(|installed| installed.path.clone())
        .unwrap_or_else(|| ctx.layout.binary_path(&version));
    println!("{}", path.display());

    let tiller = ctx.layout.tiller_path(&version);
    if tiller.is_file() {
        println!("{}", tiller.display());
    }
    Ok(())
}
