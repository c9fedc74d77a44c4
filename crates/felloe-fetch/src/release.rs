//! Discovery of published releases through the GitHub releases API.

use felloe_version::Version;
use serde::Deserialize;

use crate::downloader::Downloader;
use crate::error::{FetchError, Result};
use crate::http::HttpClient;

pub const DEFAULT_RELEASES_API: &str = "https://api.github.com/repos/helm/helm/releases";

const PAGE_SIZE: usize = 100;
const MAX_PAGES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub version:      Version,
    pub prerelease:   bool,
    pub published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubRelease {
    tag_name:     String,
    #[serde(default)]
    prerelease:   bool,
    #[serde(default)]
    draft:        bool,
    #[serde(default)]
    published_at: Option<String>,
}

impl GithubRelease {
    fn into_release(self) -> Option<Release> {
        if self.draft {
            return None;
        }
        match Version::parse(&self.tag_name) {
            Ok(version) => Some(Release {
                prerelease: self.prerelease || version.is_prerelease(),
                version,
                published_at: self.published_at,
            }),
            Err(e) => {
                tracing::debug!(tag = %self.tag_name, error = %e, "skipping unparseable release tag");
                None
            }
        }
    }
}

/// Typed view of the remote release list.
pub struct ReleaseIndex<'a, C> {
    downloader: &'a Downloader<C>,
    api:        String,
}

impl<'a, C: HttpClient> ReleaseIndex<'a, C> {
    pub fn new(downloader: &'a Downloader<C>, api: impl Into<String>) -> Self {
        Self {
            downloader,
            api: api.into().trim_end_matches('/').to_string(),
        }
    }

    /// Up to `count` releases, newest version first. Drafts and tags that are
    /// not versions are dropped.
    pub async fn releases(&self, count: usize, include_prerelease: bool) -> Result<Vec<Release>> {
        let mut releases = Vec::new();
        for page in 1..=MAX_PAGES {
            let url = format!("{}?per_page={PAGE_SIZE}&page={page}", self.api);
            let batch: Vec<GithubRelease> = self.downloader.get_json(&url).await?;
            let exhausted = batch.len() < PAGE_SIZE;

            releases.extend(
                batch
                    .into_iter()
                    .filter_map(GithubRelease::into_release)
                    .filter(|r| include_prerelease || !r.prerelease),
            );
            if exhausted || releases.len() >= count {
                break;
            }
        }

        releases.sort_by(|a, b| b.version.cmp(&a.version));
        releases.dedup_by(|a, b| a.version == b.version);
        releases.truncate(count);
        Ok(releases)
    }

    /// The release tagged for `version`, `None` if it was never published.
    pub async fn release(&self, version: &Version) -> Result<Option<Release>> {
        let url = format!("{}/tags/{}", self.api, version.tag());
        match self.downloader.get_json::<GithubRelease>(&url).await {
            Ok(raw) => Ok(raw.into_release()),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// The newest stable release as the API reports it.
    pub async fn latest(&self) -> Result<Release> {
        let url = format!("{}/latest", self.api);
        let raw: GithubRelease = self.downloader.get_json(&url).await?;
        let tag = raw.tag_name.clone();
        raw.into_release().ok_or(FetchError::InvalidResponse {
            url,
            message: format!("latest release tag {tag:?} is not a version"),
        })
    }
}
