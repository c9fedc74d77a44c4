//! The active version: `<root>/current -> versions/<version>`.

use std::path::{Path, PathBuf};

use felloe_version::Version;

use crate::error::{Error, Result};
use crate::layout::{HELM_BINARY, Layout, TILLER_BINARY};
use crate::registry::Registry;

/// Switches `<root>/current` between installed versions.
///
/// Every switch is a single rename of a freshly created link, so concurrent
/// activations leave whichever rename landed last and never a torn link.
pub struct Activator<'a> {
    registry: &'a Registry,
}

impl<'a> Activator<'a> {
    pub fn new(registry: &'a Registry) -> Self { Self { registry } }

    fn layout(&self) -> &Layout { self.registry.layout() }

    /// Points `current` at `version`.
    ///
    /// Runs under the index lock and checks the index as it is on disk, so a
    /// concurrent `remove` cannot delete the directory between the check and
    /// the link swap.
    pub fn activate(&self, version: &Version) -> Result<()> {
        let layout = self.layout();
        self.registry.locked(|installed| {
            let recorded = installed.iter().any(|i| &i.version == version);
            if !recorded || !layout.version_dir(version).is_dir() {
                return Err(Error::NotInstalled(version.clone()));
            }

            match read_current(layout) {
                Ok(Some(current)) if current == *version => {
                    tracing::debug!(%version, "already active");
                    return self.link_shims(version);
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "replacing broken active link"),
            }

            let target = Path::new("versions").join(version.to_string());
            felloe_fs::atomic_symlink(&target, layout.current_link())?;
            self.link_shims(version)?;
            tracing::info!(%version, "activated");
            Ok(())
        })
    }

    pub fn current(&self) -> Result<Option<Version>> { read_current(self.layout()) }

    /// Removes `<root>/current`, returning the version it pointed at if that
    /// could still be read.
    pub fn deactivate(&self) -> Result<Option<Version>> {
        let layout = self.layout();
        let previous = match read_current(layout) {
            Ok(previous) => previous,
            Err(e) => {
                tracing::warn!(error = %e, "removing broken active link");
                None
            }
        };

        let link = layout.current_link();
        match remove_link(&link) {
            Ok(()) => {
                tracing::info!(previous = ?previous.as_ref().map(ToString::to_string), "deactivated");
                Ok(previous)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io(format!("failed to remove {}", link.display()), e)),
        }
    }

    /// `bin/helm -> ../current/helm` always; `bin/tiller -> ../current/tiller`
    /// only while the active version ships tiller.
    fn link_shims(&self, version: &Version) -> Result<()> {
        let layout = self.layout();
        link_shim(&layout.shim_path(), HELM_BINARY)?;

        let tiller = layout.tiller_shim_path();
        if layout.tiller_path(version).is_file() {
            return link_shim(&tiller, TILLER_BINARY);
        }
        match remove_link(&tiller) {
            Ok(()) => tracing::debug!(shim = %tiller.display(), "tiller shim removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::io(format!("failed to remove {}", tiller.display()), e)),
        }
        Ok(())
    }
}

/// Links `shim` to `../current/<binary>`, created once and never retargeted.
fn link_shim(shim: &Path, binary: &str) -> Result<()> {
    let target = Path::new("..").join("current").join(binary);
    if felloe_fs::read_link(shim)?.as_deref() == Some(target.as_path()) {
        return Ok(());
    }
    if let Some(bin) = shim.parent() {
        std::fs::create_dir_all(bin).map_err(|e| Error::io(format!("failed to create {}", bin.display()), e))?;
    }
    felloe_fs::atomic_symlink(&target, shim)?;
    tracing::debug!(shim = %shim.display(), "shim linked");
    Ok(())
}

/// The version `<root>/current` points at, `None` if there is no link.
///
/// A link that cannot be read, names something other than a version, or
/// points at a missing directory is [`Error::BrokenActiveLink`].
pub fn read_current(layout: &Layout) -> Result<Option<Version>> {
    let link = layout.current_link();
    let broken = |reason: String| Error::BrokenActiveLink {
        path: link.clone(),
        reason,
    };

    let target = match felloe_fs::read_link(&link) {
        Ok(Some(target)) => target,
        Ok(None) => return Ok(None),
        Err(e) => return Err(broken(e.to_string())),
    };

    let name = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| broken(format!("target {} has no version component", target.display())))?;
    let version =
        Version::parse(name).map_err(|e| broken(format!("target {} is not a version: {e}", target.display())))?;

    let resolved: PathBuf = if target.is_absolute() {
        target.clone()
    } else {
        layout.root().join(&target)
    };
    if !resolved.is_dir() {
        return Err(broken(format!("target {} does not exist", resolved.display())));
    }
    Ok(Some(version))
}

fn remove_link(link: &Path) -> std::io::Result<()> {
    match std::fs::remove_file(link) {
        Ok(()) => Ok(()),
        #[cfg(windows)]
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => std::fs::remove_dir(link),
        Err(e) => Err(e),
    }
}
