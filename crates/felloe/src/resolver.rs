//! Turning a [`VersionRequest`] into one concrete [`Version`].

use std::fmt;
use std::path::PathBuf;

use felloe_fetch::{HttpClient, ReleaseIndex};
use felloe_version::{Partial, Version, VersionRequest};

use crate::activation;
use crate::error::{Error, Result};
use crate::layout::Layout;
use crate::pin;
use crate::registry::Registry;

/// Releases scanned when matching a partial version remotely.
const REMOTE_SCAN: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Pin(PathBuf),
    Active,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pin(path) => write!(f, "{}", path.display()),
            Self::Active => f.write_str("active version"),
        }
    }
}

/// What the surrounding context asks for when the user named no version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub request: VersionRequest,
    pub origin:  Origin,
}

pub trait SelectionSource {
    fn select(&self) -> Result<Option<Selection>>;
}

/// The nearest pin file at or above `start`.
pub struct PinSource {
    start:     PathBuf,
    file_name: String,
}

impl PinSource {
    pub fn new(start: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            start:     start.into(),
            file_name: file_name.into(),
        }
    }
}

impl SelectionSource for PinSource {
    fn select(&self) -> Result<Option<Selection>> {
        let Some(path) = pin::find(&self.start, &self.file_name) else {
            return Ok(None);
        };
        let request = pin::read(&path)?;
        Ok(Some(Selection {
            request,
            origin: Origin::Pin(path),
        }))
    }
}

/// Whatever `<root>/current` points at.
pub struct ActiveSource<'a> {
    layout: &'a Layout,
}

impl<'a> ActiveSource<'a> {
    pub fn new(layout: &'a Layout) -> Self { Self { layout } }
}

impl SelectionSource for ActiveSource<'_> {
    fn select(&self) -> Result<Option<Selection>> {
        Ok(activation::read_current(self.layout)?.map(|version| Selection {
            request: VersionRequest::Exact(version),
            origin:  Origin::Active,
        }))
    }
}

/// Asks `primary`, then `fallback` if `primary` had nothing.
pub struct PairSource<P, F> {
    primary:  P,
    fallback: F,
}

impl<P: SelectionSource, F: SelectionSource> PairSource<P, F> {
    pub fn new(primary: P, fallback: F) -> Self { Self { primary, fallback } }
}

impl<P: SelectionSource, F: SelectionSource> SelectionSource for PairSource<P, F> {
    fn select(&self) -> Result<Option<Selection>> {
        match self.primary.select()? {
            Some(selection) => Ok(Some(selection)),
            None => self.fallback.select(),
        }
    }
}

pub struct Resolver<'a, C> {
    registry:      &'a Registry,
    source:        PairSource<PinSource, ActiveSource<'a>>,
    pin_file:      String,
    cwd:           PathBuf,
    remote:        Option<ReleaseIndex<'a, C>>,
    prefer_remote: bool,
}

impl<'a, C: HttpClient> Resolver<'a, C> {
    pub fn new(registry: &'a Registry, cwd: impl Into<PathBuf>, pin_file: impl Into<String>) -> Self {
        let cwd = cwd.into();
        let pin_file = pin_file.into();
        Self {
            registry,
            source: PairSource::new(
                PinSource::new(cwd.clone(), pin_file.clone()),
                ActiveSource::new(registry.layout()),
            ),
            pin_file,
            cwd,
            remote: None,
            prefer_remote: false,
        }
    }

    pub fn with_remote(mut self, index: ReleaseIndex<'a, C>) -> Self {
        self.remote = Some(index);
        self
    }

    /// Resolve `latest` against the remote index even when something is
    /// installed.
    pub fn prefer_remote(mut self, prefer: bool) -> Self {
        self.prefer_remote = prefer;
        self
    }

    /// Pin file first, then the active version.
    pub fn selection(&self) -> Result<Option<Selection>> { self.source.select() }

    /// Replaces `ProjectPinned` with the request the pin file or active
    /// version makes. Other requests are returned as they are.
    pub fn expand(&self, request: &VersionRequest) -> Result<VersionRequest> {
        if *request != VersionRequest::ProjectPinned {
            return Ok(request.clone());
        }
        let selection = self.selection()?.ok_or_else(|| self.nothing_selected())?;
        tracing::debug!(origin = %selection.origin, request = %selection.request, "selected");
        Ok(selection.request)
    }

    pub async fn resolve(&self, request: &VersionRequest) -> Result<Version> {
        let request = self.expand(request)?;
        let version = self.resolve_concrete(&request).await?;
        tracing::debug!(%request, %version, "resolved");
        Ok(version)
    }

    fn nothing_selected(&self) -> Error {
        Error::NoVersionSelected {
            pin_file: self.pin_file.clone(),
            cwd:      self.cwd.clone(),
        }
    }

    async fn resolve_concrete(&self, request: &VersionRequest) -> Result<Version> {
        match request {
            VersionRequest::Exact(version) => self.resolve_exact(version).await,
            VersionRequest::Latest => self.resolve_latest().await,
            VersionRequest::Partial(partial) => self.resolve_partial(partial).await,
            VersionRequest::ProjectPinned => Err(self.nothing_selected()),
        }
    }

    async fn resolve_exact(&self, version: &Version) -> Result<Version> {
        if self.registry.exists(version) {
            return Ok(version.clone());
        }
        if let Some(remote) = &self.remote
            && remote.release(version).await?.is_some()
        {
            return Ok(version.clone());
        }
        Err(Error::VersionNotFound(version.to_string()))
    }

    async fn resolve_latest(&self) -> Result<Version> {
        if !self.prefer_remote
            && let Some(installed) = self.registry.versions().next()
        {
            return Ok(installed.clone());
        }
        if let Some(remote) = &self.remote {
            return Ok(remote.latest().await?.version);
        }
        self.registry
            .versions()
            .next()
            .cloned()
            .ok_or_else(|| Error::VersionNotFound("latest".to_string()))
    }

    async fn resolve_partial(&self, partial: &Partial) -> Result<Version> {
        if let Some(installed) = self.registry.versions().find(|v| partial.matches(v)) {
            return Ok(installed.clone());
        }
        if let Some(remote) = &self.remote {
            let releases = remote.releases(REMOTE_SCAN, false).await?;
            if let Some(release) = releases.into_iter().find(|r| partial.matches(&r.version)) {
                return Ok(release.version);
            }
        }
        Err(Error::VersionNotFound(partial.to_string()))
    }
}
