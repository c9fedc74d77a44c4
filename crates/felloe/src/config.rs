use std::path::Path;
use std::time::Duration;

use felloe_fetch::{DEFAULT_RELEASES_API, RetryPolicy};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_DOWNLOAD_URL: &str = "https://get.helm.sh";
pub const DEFAULT_PIN_FILE: &str = ".helm-version";
pub const ENV_PREFIX: &str = "FELLOE_";

/// User settings, merged from defaults, `<root>/config.toml` and `FELLOE_*`
/// environment variables, later sources winning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL release archives and their checksum files live under.
    pub download_url:     String,
    /// GitHub releases API endpoint for the helm repository.
    pub releases_api:     String,
    pub max_retries:      u32,
    pub retry_backoff_ms: u64,
    /// Name of the per-project pin file.
    pub pin_file:         String,
    /// Whether version resolution may consult the remote release index.
    pub remote_lookup:    bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            download_url:     DEFAULT_DOWNLOAD_URL.to_string(),
            releases_api:     DEFAULT_RELEASES_API.to_string(),
            max_retries:      3,
            retry_backoff_ms: 250,
            pin_file:         DEFAULT_PIN_FILE.to_string(),
            remote_lookup:    true,
        }
    }
}

impl Config {
    pub fn figment(config_file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["root", "log"]))
    }

    pub fn load(config_file: &Path) -> Result<Self> { Ok(Self::figment(config_file).extract()?) }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_millis(self.retry_backoff_ms))
    }
}
