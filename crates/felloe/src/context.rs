use std::path::PathBuf;

use felloe_fetch::{ReqwestClient, ReleaseIndex};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetcher::Fetcher;
use crate::layout::Layout;
use crate::registry::Registry;
use crate::resolver::Resolver;

/// Everything one invocation needs: where the root is, how it is configured
/// and which directory the user is standing in.
#[derive(Debug, Clone)]
pub struct Context {
    pub layout: Layout,
    pub config: Config,
    pub cwd:    PathBuf,
}

impl Context {
    pub fn load(root: Option<PathBuf>) -> Result<Self> {
        let layout = Layout::discover(root)?;
        let config = Config::load(&layout.config_path())?;
        let cwd = std::env::current_dir().map_err(|e| Error::io("failed to read the working directory", e))?;
        tracing::debug!(root = %layout.root().display(), ?config, "loaded context");
        Ok(Self { layout, config, cwd })
    }

    pub fn registry(&self) -> Result<Registry> { Registry::open(&self.layout) }

    pub fn fetcher(&self) -> Result<Fetcher<ReqwestClient>> {
        Fetcher::new(ReqwestClient::new()?, &self.layout, &self.config)
    }

    /// A resolver that consults `remote` only when `remote_lookup` is enabled.
    pub fn resolver<'a>(
        &'a self,
        registry: &'a Registry,
        remote: Option<ReleaseIndex<'a, ReqwestClient>>,
    ) -> Resolver<'a, ReqwestClient> {
        let resolver = Resolver::new(registry, self.cwd.clone(), self.config.pin_file.clone());
        match remote {
            Some(index) if self.config.remote_lookup => resolver.with_remote(index),
            _ => resolver,
        }
    }
}
