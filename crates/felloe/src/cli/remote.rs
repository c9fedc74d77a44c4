use clap::Args;
use felloe_version::{Partial, VersionRequest};

use super::install::InstallArgs;
use crate::activation;
use crate::context::Context;
use crate::ui::table::{self, FormatConfig, ReleaseRow};

/// Releases scanned when a filter narrows the list.
const FILTER_SCAN: usize = 1000;

#[derive(Debug, Args)]
pub struct VersionsArgs {
    /// Only versions starting with this prefix, e.g. 3.14
    #[arg(long)]
    pub filter: Option<Partial>,

    /// Include release candidates
    #[arg(long)]
    pub prerelease: bool,

    /// How many versions to show
    #[arg(long, default_value_t = 25)]
    pub last: usize,
}

#[derive(Debug, Args)]
pub struct LatestArgs {
    /// Print the newest release instead of installing it
    #[arg(long, conflicts_with = "no_use")]
    pub print: bool,

    /// Install without switching to it
    #[arg(long)]
    pub no_use: bool,
}

pub async fn versions(ctx: &Context, args: VersionsArgs) -> anyhow::Result<()> {
    let registry = ctx.registry()?;
    let active = activation::read_current(&ctx.layout).unwrap_or_else(|e| {
        tracing::warn!("{e}");
        None
    });
    let fetcher = ctx.fetcher()?;

    let scan = if args.filter.is_some() { FILTER_SCAN } else { args.last };
    let releases = fetcher.index().releases(scan, args.prerelease).await?;

    let matching: Vec<_> = releases
        .into_iter()
        .filter(|r| args.filter.is_none_or(|p| p.matches(&r.version)))
        .collect();
    let hidden = matching.len().saturating_sub(args.last);

    let rows: Vec<ReleaseRow> = matching
        .into_iter()
        .take(args.last)
        .map(|r| ReleaseRow {
            status:    if active.as_ref() == Some(&r.version) {
                "active"
            } else if registry.exists(&r.version) {
                "installed"
            } else {
                ""
            },
            published: r
                .published_at
                .as_deref()
                .and_then(|at| at.get(..10))
                .unwrap_or_default()
                .to_string(),
            version:   r.version.to_string(),
        })
        .collect();

    if rows.is_empty() {
        eprintln!("no matching releases");
        return Ok(());
    }
    let config = FormatConfig {
        footer: (hidden > 0).then(|| format!("{hidden} older; raise --last to see them")),
    };
    println!("{}", table::render(rows, config));
    Ok(())
}

/// Installs and switches to the newest stable release, or only prints it.
pub async fn latest(ctx: &Context, args: LatestArgs) -> anyhow::Result<()> {
    if args.print {
        let fetcher = ctx.fetcher()?;
        let release = fetcher.index().latest().await?;
        println!("{}", release.version);
        return Ok(());
    }
    super::install::install(ctx, InstallArgs {
        request: Some(VersionRequest::Latest),
        no_use:  args.no_use,
    })
    .await
}
