//! Download, verify, extract and register one helm release.

use std::fs::File;
use std::io::BufReader;

use chrono::Utc;
use felloe_archive::ExtractOptions;
use felloe_fetch::{Downloader, FetchOptions, HttpClient, ProgressCallback, ReleaseIndex};
use felloe_fs::Workspace;
use felloe_platform::Platform;
use felloe_version::Version;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::layout::{HELM_BINARY, Layout, TILLER_BINARY};
use crate::registry::{InstalledVersion, Registry};

pub struct Fetcher<C> {
    downloader:   Downloader<C>,
    layout:       Layout,
    download_url: String,
    releases_api: String,
    platform:     Platform,
    on_progress:  Option<ProgressCallback>,
}

impl<C: HttpClient> Fetcher<C> {
    pub fn new(client: C, layout: &Layout, config: &Config) -> Result<Self> {
        Ok(Self {
            downloader:   Downloader::new(client).with_policy(config.retry_policy()),
            layout:       layout.clone(),
            download_url: config.download_url.trim_end_matches('/').to_string(),
            releases_api: config.releases_api.clone(),
            platform:     Platform::current()?,
            on_progress:  None,
        })
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn on_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    pub fn downloader(&self) -> &Downloader<C> { &self.downloader }

    /// The remote release list.
    pub fn index(&self) -> ReleaseIndex<'_, C> { ReleaseIndex::new(&self.downloader, self.releases_api.as_str()) }

    /// `helm-v3.14.0-linux-amd64.tar.gz`
    pub fn archive_name(&self, version: &Version) -> String {
        format!("helm-{}-{}.{}", version.tag(), self.platform, self.platform.os.archive_ext())
    }

    pub fn archive_url(&self, version: &Version) -> String {
        format!("{}/{}", self.download_url, self.archive_name(version))
    }

    /// Installs `version` into `<root>/versions/<version>` and records it.
    ///
    /// Everything is staged under `<root>/tmp`; on any failure the staging
    /// area is removed and neither the versions directory nor the registry
    /// changes.
    pub async fn fetch(&self, version: &Version, registry: &mut Registry) -> Result<InstalledVersion> {
        self.layout.ensure()?;
        let archive_name = self.archive_name(version);
        let archive_url = self.archive_url(version);

        let checksum = self.checksum(&archive_url).await?;
        let expected = felloe_verify::parse_checksum_file(&checksum, &archive_name)?;
        tracing::debug!(%version, %expected, "expected archive digest");

        let tmp = self.layout.tmp_dir();
        let scratch = tempfile::Builder::new()
            .prefix("fetch-")
            .tempdir_in(&tmp)
            .map_err(|e| Error::io(format!("failed to create staging directory in {}", tmp.display()), e))?;
        let archive_path = scratch.path().join(&archive_name);

        let mut options = FetchOptions::default().checksum(expected);
        if let Some(callback) = &self.on_progress {
            options = options.on_progress(callback.clone());
        }
        let download = self.downloader.download(&archive_url, &archive_path, &options).await?;
        tracing::info!(url = %archive_url, bytes = download.bytes, "downloaded");

        let destination = self.layout.version_dir(version);
        let workspace = Workspace::new(scratch.path().join("stage"), &destination)?;
        let archive = File::open(&download.path)
            .map_err(|e| Error::io(format!("failed to open {}", download.path.display()), e))?;
        let report = felloe_archive::extract(
            BufReader::new(archive),
            workspace.path(),
            &ExtractOptions::default().strip_components(1),
        )?;
        tracing::debug!(entries = report.entries.len(), bytes = report.total_bytes, "extracted");

        let staged_binary = workspace.path().join(HELM_BINARY);
        if !staged_binary.is_file() {
            return Err(Error::MissingBinary {
                archive: archive_name,
                binary:  HELM_BINARY.to_string(),
            });
        }
        felloe_fs::make_executable(&staged_binary)?;
        let staged_tiller = workspace.path().join(TILLER_BINARY);
        if staged_tiller.is_file() {
            felloe_fs::make_executable(&staged_tiller)?;
        }

        if destination.exists() {
            tracing::warn!(dir = %destination.display(), "replacing unregistered version directory");
        }
        let installed_dir = workspace.commit()?;

        let installed = InstalledVersion {
            version:      version.clone(),
            path:         installed_dir.join(HELM_BINARY),
            installed_at: Utc::now(),
            sha256:       Some(download.digest.to_string()),
        };
        registry.record_install(installed.clone())?;
        Ok(installed)
    }

    /// `{archive}.sha256sum`, or the bare-digest `{archive}.sha256` that is
    /// all some helm 2 releases publish.
    async fn checksum(&self, archive_url: &str) -> Result<String> {
        let body = match self.downloader.get(&format!("{archive_url}.sha256sum")).await {
            Ok(body) => body,
            Err(e) if e.is_not_found() => {
                tracing::debug!(url = archive_url, "no .sha256sum published, trying .sha256");
                self.downloader.get(&format!("{archive_url}.sha256")).await?
            }
            Err(e) => return Err(e.into()),
        };
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
