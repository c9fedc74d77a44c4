use clap::Args;
use console::style;
use felloe_version::Version;

use crate::activation::Activator;
use crate::context::Context;

#[derive(Debug, Args)]
pub struct UninstallArgs {
    /// Versions to remove
    #[arg(required = true)]
    pub versions: Vec<Version>,

    /// Deactivate first when removing the active version, or when the
    /// active link is broken
    #[arg(long, short)]
    pub force: bool,
}

pub fn uninstall(ctx: &Context, args: UninstallArgs) -> anyhow::Result<()> {
    let mut registry = ctx.registry()?;
    for version in &args.versions {
        if args.force {
            let activator = Activator::new(&registry);
            let unlink = match activator.current() {
                Ok(active) => active.as_ref() == Some(version),
                Err(e) => {
                    tracing::warn!("{e}");
                    true
                }
            };
            if unlink {
                match activator.deactivate()? {
                    Some(previous) => eprintln!("deactivated helm {previous}"),
                    None => eprintln!("removed broken active link"),
                }
            }
        }
        registry.remove(version)?;
        eprintln!("{} helm {version}", style("removed").green().bold());
    }
    Ok(())
}

pub fn prune(ctx: &Context) -> anyhow::Result<()> {
    let mut registry = ctx.registry()?;
    let active = active_version(&Activator::new(&registry));
    let doomed: Vec<Version> = registry
        .versions()
        .filter(|v| Some(*v) != active.as_ref())
        .cloned()
        .collect();

    if doomed.is_empty() {
        eprintln!("nothing to prune");
        return Ok(());
    }
    for version in &doomed {
        registry.remove(version)?;
        eprintln!("{} helm {version}", style("removed").green().bold());
    }
    Ok(())
}

/// A broken `current` link protects nothing, so removals carry on past it.
fn active_version(activator: &Activator<'_>) -> Option<Version> {
    activator.current().unwrap_or_else(|e| {
        tracing::warn!("{e}");
        None
    })
}
