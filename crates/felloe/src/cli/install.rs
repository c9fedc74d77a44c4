use clap::Args;
use console::style;
use felloe_fetch::ReqwestClient;
use felloe_version::{Version, VersionRequest};

use crate::activation::Activator;
use crate::context::Context;
use crate::error::Result;
use crate::fetcher::Fetcher;
use crate::registry::{InstalledVersion, Registry};
use crate::ui::tracker::DownloadTracker;

#[derive(Debug, Args)]
pub struct InstallArgs {
    /// `latest`, a version like 3.14.0 or a prefix like 3.14 [default: pinned version]
    #[arg(value_name = "VERSION")]
    pub request: Option<VersionRequest>,

    /// Install without switching to it
    #[arg(long)]
    pub no_use: bool,
}

#[derive(Debug, Args)]
pub struct UseArgs {
    /// `latest`, a version like 3.14.0 or a prefix like 3.14 [default: pinned version]
    #[arg(value_name = "VERSION")]
    pub request: Option<VersionRequest>,

    /// Install the version first if it is missing
    #[arg(long)]
    pub install: bool,
}

pub async fn install(ctx: &Context, args: InstallArgs) -> anyhow::Result<()> {
    let request = args.request.unwrap_or(VersionRequest::ProjectPinned);
    let mut registry = ctx.registry()?;
    let fetcher = ctx.fetcher()?;

    let version = ctx
        .resolver(&registry, Some(fetcher.index()))
        .prefer_remote(request == VersionRequest::Latest)
        .resolve(&request)
        .await?;

    if registry.exists(&version) {
        eprintln!("helm {version} is already installed");
    } else {
        download(fetcher, &version, &mut registry).await?;
    }

    if !args.no_use {
        switch(&registry, &version)?;
    }
    Ok(())
}

pub async fn use_version(ctx: &Context, args: UseArgs) -> anyhow::Result<()> {
    let request = args.request.unwrap_or(VersionRequest::ProjectPinned);
    let mut registry = ctx.registry()?;

    let version = if args.install {
        let fetcher = ctx.fetcher()?;
        let version = ctx
            .resolver(&registry, Some(fetcher.index()))
            .resolve(&request)
            .await?;
        if !registry.exists(&version) {
            download(fetcher, &version, &mut registry).await?;
        }
        version
    } else {
        super::resolve_installed(ctx, &registry, &request).await?
    };

    switch(&registry, &version)?;
    Ok(())
}

async fn download(
    fetcher: Fetcher<ReqwestClient>,
    version: &Version,
    registry: &mut Registry,
) -> Result<InstalledVersion> {
    let tracker = DownloadTracker::new(format!("helm {version}"));
    let fetcher = fetcher.on_progress(tracker.callback());
    let result = fetcher.fetch(version, registry).await;
    tracker.finish(None);

    let installed = result?;
    eprintln!(
        "{} helm {version} into {}",
        style("installed").green().bold(),
        installed.path.display()
    );
    Ok(installed)
}

pub(super) fn switch(registry: &Registry, version: &Version) -> Result<()> {
    Activator::new(registry).activate(version)?;
    eprintln!("{} helm {version}", style("using").green().bold());

    let bin = registry.layout().bin_dir();
    if !felloe_platform::env::is_in_path(&bin) {
        eprintln!(
            "{} {} is not on PATH; see `felloe env`",
            style("note:").yellow().bold(),
            bin.display()
        );
    }
    Ok(())
}
