mod common;

use std::path::Path;

use assert_cmd::Command;
use common::{seed, v};
use felloe::layout::Layout;
use felloe::registry::Registry;
use predicates::prelude::*;

fn felloe(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("felloe").unwrap();
    cmd.arg("--root")
        .arg(root)
        .env("FELLOE_REMOTE_LOOKUP", "false")
        .env_remove("FELLOE_LOG")
        .env_remove("RUST_LOG")
        .current_dir(root);
    cmd
}

fn seeded(versions: &[&str]) -> (tempfile::TempDir, Layout) {
    let dir = tempfile::tempdir().unwrap();
    let layout = Layout::new(dir.path());
    let mut registry = Registry::open(&layout).unwrap();
    for version in versions {
        seed(&layout, &mut registry, &v(version));
    }
    (dir, layout)
}

#[test]
fn help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    felloe(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install").and(predicate::str::contains("uninstall")));
}

#[test]
fn unknown_command_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    felloe(dir.path()).arg("frobnicate").assert().code(2);
}

#[test]
fn list_empty() {
    let dir = tempfile::tempdir().unwrap();
    felloe(dir.path())
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::contains("no helm versions installed"));
}

#[test]
fn current_without_selection_fails() {
    let dir = tempfile::tempdir().unwrap();
    felloe(dir.path())
        .arg("current")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error:").and(predicate::str::contains("no helm version selected")));
}

#[test]
fn use_requires_install() {
    let (dir, _layout) = seeded(&["3.14.0"]);
    felloe(dir.path())
        .args(["use", "3.13.3"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("helm 3.13.3 is not installed"));
}

#[test]
fn bad_version_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    for command in ["install", "use", "which", "pin", "run", "exec"] {
        felloe(dir.path())
            .args([command, "three"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("three"));
    }
}

#[test]
fn use_install_of_unpublished_version_is_not_found() {
    let (dir, _layout) = seeded(&["3.14.0"]);
    let mut server = mockito::Server::new();
    let tag = server.mock("GET", "/tags/v3.99.0").with_status(404).create();
    let archive = server
        .mock("GET", mockito::Matcher::Regex("helm-v3.99.0".to_string()))
        .expect(0)
        .create();

    felloe(dir.path())
        .env("FELLOE_REMOTE_LOOKUP", "true")
        .env("FELLOE_RELEASES_API", server.url())
        .env("FELLOE_DOWNLOAD_URL", server.url())
        .args(["use", "--install", "3.99.0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no helm release matches 3.99.0"));

    tag.assert();
    archive.assert();
}

#[test]
fn latest_print_asks_the_release_index() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/latest")
        .with_body(r#"{"tag_name": "v3.15.2"}"#)
        .create();

    felloe(dir.path())
        .env("FELLOE_RELEASES_API", server.url())
        .args(["latest", "--print"])
        .assert()
        .success()
        .stdout("3.15.2\n");
}

#[test]
fn bare_invocation_without_terminal_lists_versions() {
    let (dir, _layout) = seeded(&["3.14.0", "3.13.3"]);
    felloe(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("3.14.0").and(predicate::str::contains("3.13.3")));
}

#[cfg(unix)]
#[test]
fn use_list_current_which() {
    let (dir, layout) = seeded(&["3.14.0", "3.13.3"]);

    felloe(dir.path())
        .args(["use", "v3.13.3"])
        .assert()
        .success()
        .stderr(predicate::str::contains("using"));

    felloe(dir.path()).arg("current").assert().success().stdout("3.13.3\n");

    felloe(dir.path())
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"\*\s+3\.13\.3").unwrap());

    felloe(dir.path())
        .args(["list", "--quiet"])
        .assert()
        .success()
        .stdout("3.14.0\n3.13.3\n");

    let expected = format!("{}\n", layout.binary_path(&v("3.14.0")).display());
    felloe(dir.path()).args(["which", "3.14"]).assert().success().stdout(expected);
}

#[cfg(unix)]
#[test]
fn pinned_version_drives_use_and_which() {
    let (dir, layout) = seeded(&["3.14.0", "3.13.3"]);
    let project = dir.path().join("project");
    std::fs::create_dir_all(&project).unwrap();

    felloe(dir.path()).current_dir(&project).args(["pin", "3.13.3"]).assert().success();
    assert_eq!(std::fs::read_to_string(project.join(".helm-version")).unwrap(), "3.13.3\n");

    let expected = format!("{}\n", layout.binary_path(&v("3.13.3")).display());
    felloe(dir.path()).current_dir(&project).arg("which").assert().success().stdout(expected);

    felloe(dir.path()).current_dir(&project).arg("use").assert().success();
    felloe(dir.path()).arg("current").assert().success().stdout("3.13.3\n");
}

#[cfg(unix)]
#[test]
fn uninstall_active_needs_force() {
    let (dir, layout) = seeded(&["3.14.0", "3.13.3"]);
    felloe(dir.path()).args(["use", "3.14.0"]).assert().success();

    felloe(dir.path())
        .args(["rm", "3.14.0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("active version"));
    assert!(layout.version_dir(&v("3.14.0")).is_dir());

    felloe(dir.path()).args(["uninstall", "--force", "3.14.0"]).assert().success();
    assert!(!layout.version_dir(&v("3.14.0")).exists());
    felloe(dir.path()).arg("current").assert().code(1);
}

#[cfg(unix)]
#[test]
fn prune_keeps_active() {
    let (dir, layout) = seeded(&["3.14.0", "3.13.3", "3.12.0"]);
    felloe(dir.path()).args(["use", "3.13.3"]).assert().success();

    felloe(dir.path()).arg("prune").assert().success();
    felloe(dir.path())
        .args(["ls", "-q"])
        .assert()
        .success()
        .stdout("3.13.3\n");
    assert!(!layout.version_dir(&v("3.12.0")).exists());
}

#[cfg(unix)]
#[test]
fn run_forwards_args_and_exit_code() {
    let (dir, _layout) = seeded(&["3.14.0"]);
    felloe(dir.path())
        .args(["run", "3.14.0", "version", "--short"])
        .assert()
        .success()
        .stdout("v3.14.0 version --short\n");

    felloe(dir.path())
        .args(["exec", "3.14.0", "sh", "-c", "helm template; exit 4"])
        .assert()
        .code(4)
        .stdout("v3.14.0 template\n");
}

#[test]
fn env_prints_path_line() {
    let dir = tempfile::tempdir().unwrap();
    let expected = format!("export PATH=\"{}:$PATH\"", dir.path().join("bin").display());
    felloe(dir.path())
        .args(["env", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
}

#[test]
fn completions_for_named_shell() {
    let dir = tempfile::tempdir().unwrap();
    felloe(dir.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef felloe"));
}

#[cfg(unix)]
#[test]
fn broken_active_link_does_not_block_removal() {
    let (dir, layout) = seeded(&["3.14.0", "3.13.3", "3.12.0"]);
    felloe(dir.path()).args(["use", "3.14.0"]).assert().success();
    std::fs::remove_dir_all(layout.version_dir(&v("3.14.0"))).unwrap();

    felloe(dir.path()).args(["rm", "3.13.3"]).assert().success();
    felloe(dir.path())
        .args(["uninstall", "--force", "3.14.0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("removed broken active link"));
    assert!(std::fs::symlink_metadata(layout.current_link()).is_err());

    felloe(dir.path()).arg("prune").assert().success();
    felloe(dir.path())
        .arg("ls")
        .assert()
        .success()
        .stderr(predicate::str::contains("no helm versions installed"));
}

#[cfg(unix)]
#[test]
fn which_lists_tiller_for_helm2() {
    let (dir, layout) = seeded(&["2.17.0"]);
    let tiller = layout.tiller_path(&v("2.17.0"));
    std::fs::write(&tiller, "#!/bin/sh\n").unwrap();

    let expected = format!("{}\n{}\n", layout.binary_path(&v("2.17.0")).display(), tiller.display());
    felloe(dir.path()).args(["which", "2.17.0"]).assert().success().stdout(expected);
}
