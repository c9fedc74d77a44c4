#![allow(dead_code)]

use chrono::Utc;
use felloe::config::Config;
use felloe::layout::Layout;
use felloe::registry::{InstalledVersion, Registry};
use felloe_fetch::mock::{MockClient, MockResponse};
use felloe_platform::Platform;
use felloe_platform::arch::Arch;
use felloe_platform::os::Os;
use felloe_verify::Sha256Hasher;
use felloe_version::Version;
use flate2::Compression;
use flate2::write::GzEncoder;

pub const DOWNLOAD_URL: &str = "https://get.helm.sh";
pub const RELEASES_API: &str = "https://api.github.com/repos/helm/helm/releases";

pub fn v(s: &str) -> Version { Version::parse(s).unwrap() }

pub fn config() -> Config {
    Config {
        max_retries: 2,
        retry_backoff_ms: 1,
        ..Config::default()
    }
}

pub fn linux_amd64() -> Platform { Platform::new(Os::Linux, Arch::X86_64) }

pub fn archive_name(version: &Version) -> String { format!("helm-{}-linux-amd64.tar.gz", version.tag()) }

pub fn archive_url(version: &Version) -> String { format!("{DOWNLOAD_URL}/{}", archive_name(version)) }

pub fn checksum_url(version: &Version) -> String { format!("{}.sha256sum", archive_url(version)) }

/// A gzipped tarball laid out like a real helm release.
pub fn helm_archive(version: &Version) -> Vec<u8> {
    let script = format!("#!/bin/sh\necho \"{}\"\n", version.tag());
    tarball(&[
        ("linux-amd64/helm", script.as_bytes(), 0o755),
        ("linux-amd64/LICENSE", b"Apache License 2.0\n", 0o644),
        ("linux-amd64/README.md", b"helm\n", 0o644),
    ])
}

pub fn tarball(files: &[(&str, &[u8], u32)]) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (path, data, mode) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(*mode);
        header.set_entry_type(tar::EntryType::Regular);
        builder.append_data(&mut header, path, *data).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

pub fn checksum_line(archive: &[u8], name: &str) -> String {
    format!("{}  {name}\n", Sha256Hasher::digest(archive))
}

/// Serves `archive` and a matching checksum file for `version`.
pub fn serve_release(client: MockClient, version: &Version, archive: Vec<u8>) -> MockClient {
    let checksum = checksum_line(&archive, &archive_name(version));
    client
        .route(checksum_url(version), MockResponse::body(checksum))
        .route(archive_url(version), MockResponse::body(archive))
}

/// Puts a fake helm for `version` on disk and records it, bypassing the fetcher.
pub fn seed(layout: &Layout, registry: &mut Registry, version: &Version) {
    let dir = layout.version_dir(version);
    std::fs::create_dir_all(&dir).unwrap();
    let binary = layout.binary_path(version);
    std::fs::write(&binary, format!("#!/bin/sh\necho \"{}\" \"$@\"\n", version.tag())).unwrap();
    felloe_fs::make_executable(&binary).unwrap();
    registry
        .record_install(InstalledVersion {
            version:      version.clone(),
            path:         binary,
            installed_at: Utc::now(),
            sha256:       None,
        })
        .unwrap();
}

pub fn is_empty_dir(path: &std::path::Path) -> bool {
    std::fs::read_dir(path).map(|mut entries| entries.next().is_none()).unwrap_or(true)
}
