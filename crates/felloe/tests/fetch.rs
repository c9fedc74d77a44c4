#![cfg(unix)]

mod common;

use std::os::unix::fs::PermissionsExt;

use common::{archive_url, checksum_url, config, helm_archive, is_empty_dir, linux_amd64, serve_release, tarball, v};
use felloe::Error;
use felloe::fetcher::Fetcher;
use felloe::layout::Layout;
use felloe::registry::Registry;
use felloe_fetch::mock::{MockClient, MockResponse};
use felloe_verify::Sha256Hasher;

fn fetcher(client: MockClient, layout: &Layout) -> Fetcher<MockClient> {
    Fetcher::new(client, layout, &config()).unwrap().with_platform(linux_amd64())
}

#[tokio::test]
async fn fetch_installs_and_records() {
    let dir = tempfile::tempdir().unwrap();
    let layout = Layout::new(dir.path());
    let version = v("3.14.0");
    let archive = helm_archive(&version);
    let digest = Sha256Hasher::digest(&archive).to_string();
    let client = serve_release(MockClient::new(), &version, archive);
    let mut registry = Registry::open(&layout).unwrap();

    let installed = fetcher(client, &layout).fetch(&version, &mut registry).await.unwrap();

    assert_eq!(installed.path, layout.binary_path(&version));
    assert_eq!(installed.sha256.as_deref(), Some(digest.as_str()));
    assert!(registry.exists(&version));
    assert!(Registry::open(&layout).unwrap().exists(&version));

    let mode = std::fs::metadata(&installed.path).unwrap().permissions().mode();
    assert_ne!(mode & 0o111, 0);
    assert!(layout.version_dir(&version).join("LICENSE").is_file());
    assert!(is_empty_dir(&layout.tmp_dir()));
}

#[tokio::test]
async fn checksum_mismatch_leaves_no_trace() {
    let dir = tempfile::tempdir().unwrap();
    let layout = Layout::new(dir.path());
    let version = v("3.14.0");
    let wrong = format!("{}  helm-v3.14.0-linux-amd64.tar.gz\n", Sha256Hasher::digest(b"not the archive"));
    let client = MockClient::new()
        .route(checksum_url(&version), MockResponse::body(wrong))
        .route(archive_url(&version), MockResponse::body(helm_archive(&version)));
    let mut registry = Registry::open(&layout).unwrap();
    let before = registry.list();

    let fetcher = fetcher(client, &layout);
    let err = fetcher.fetch(&version, &mut registry).await.unwrap_err();

    assert!(matches!(err, Error::ChecksumMismatch { ref file, .. } if file == "helm-v3.14.0-linux-amd64.tar.gz"));
    assert_eq!(fetcher.downloader().client().hits(&archive_url(&version)), 1);
    assert_eq!(registry.list(), before);
    assert!(Registry::open(&layout).unwrap().list().is_empty());
    assert!(!layout.version_dir(&version).exists());
    assert!(is_empty_dir(&layout.tmp_dir()));
}

#[tokio::test]
async fn archive_without_helm_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let layout = Layout::new(dir.path());
    let version = v("3.14.0");
    let archive = tarball(&[("linux-amd64/LICENSE", b"Apache License 2.0\n", 0o644)]);
    let client = serve_release(MockClient::new(), &version, archive);
    let mut registry = Registry::open(&layout).unwrap();

    let err = fetcher(client, &layout).fetch(&version, &mut registry).await.unwrap_err();
    assert!(matches!(err, Error::MissingBinary { .. }));
    assert!(!registry.exists(&version));
    assert!(!layout.version_dir(&version).exists());
    assert!(is_empty_dir(&layout.tmp_dir()));
}

#[tokio::test]
async fn transient_failures_are_retried() {
    let dir = tempfile::tempdir().unwrap();
    let layout = Layout::new(dir.path());
    let version = v("3.13.3");
    let archive = helm_archive(&version);
    let client = MockClient::new()
        .route(archive_url(&version), MockResponse::Status(503))
        .route(archive_url(&version), MockResponse::Disconnect);
    let client = serve_release(client, &version, archive);
    let mut registry = Registry::open(&layout).unwrap();

    let fetcher = fetcher(client, &layout);
    fetcher.fetch(&version, &mut registry).await.unwrap();
    assert_eq!(fetcher.downloader().client().hits(&archive_url(&version)), 3);
    assert!(registry.exists(&version));
}

#[tokio::test]
async fn persistent_failure_is_fetch_failed() {
    let dir = tempfile::tempdir().unwrap();
    let layout = Layout::new(dir.path());
    let version = v("3.13.3");
    let client = MockClient::new()
        .route(checksum_url(&version), MockResponse::body("0".repeat(64)))
        .route(archive_url(&version), MockResponse::Status(502));
    let mut registry = Registry::open(&layout).unwrap();

    let err = fetcher(client, &layout).fetch(&version, &mut registry).await.unwrap_err();
    assert!(matches!(err, Error::FetchFailed { attempts: 3, .. }));
    assert!(registry.list().is_empty());
    assert!(is_empty_dir(&layout.tmp_dir()));
}

#[tokio::test]
async fn unpublished_version_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let layout = Layout::new(dir.path());
    let version = v("9.9.9");
    let client = MockClient::new();
    let mut registry = Registry::open(&layout).unwrap();

    let fetcher = fetcher(client, &layout);
    let err = fetcher.fetch(&version, &mut registry).await.unwrap_err();
    assert!(matches!(err, Error::Fetch(ref e) if e.is_not_found()));
    assert_eq!(fetcher.downloader().client().hits(&checksum_url(&version)), 1);
    assert_eq!(fetcher.downloader().client().hits(&format!("{}.sha256", archive_url(&version))), 1);
    assert_eq!(fetcher.downloader().client().hits(&archive_url(&version)), 0);
}

#[tokio::test]
async fn bare_sha256_is_used_when_sha256sum_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let layout = Layout::new(dir.path());
    let version = v("2.17.0");
    let archive = tarball(&[
        ("linux-amd64/helm", b"#!/bin/sh\necho v2.17.0\n", 0o644),
        ("linux-amd64/tiller", b"#!/bin/sh\necho tiller\n", 0o644),
    ]);
    let digest = Sha256Hasher::digest(&archive).to_string();
    let client = MockClient::new()
        .route(format!("{}.sha256", archive_url(&version)), MockResponse::body(format!("{digest}\n")))
        .route(archive_url(&version), MockResponse::body(archive));
    let mut registry = Registry::open(&layout).unwrap();

    let fetcher = fetcher(client, &layout);
    let installed = fetcher.fetch(&version, &mut registry).await.unwrap();

    assert_eq!(installed.sha256.as_deref(), Some(digest.as_str()));
    assert_eq!(fetcher.downloader().client().hits(&checksum_url(&version)), 1);
    for binary in [layout.binary_path(&version), layout.tiller_path(&version)] {
        let mode = std::fs::metadata(&binary).unwrap().permissions().mode();
        assert_ne!(mode & 0o111, 0, "{} is not executable", binary.display());
    }
}
