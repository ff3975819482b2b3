//! Tests for the `updater` binary.
//!
//! The server runs on the multi-threaded runtime's workers while the test
//! thread blocks on the child process.

use crate::common::UpdateServer;
use app_updater::test_utils::TestInstall;
use app_updater::test_utils::fixtures::zip_package;
use assert_cmd::Command;
use predicates::prelude::*;

fn updater(install: &TestInstall) -> Command {
    let mut cmd = Command::cargo_bin("updater").unwrap();
    cmd.arg("--config")
        .arg(install.config_path())
        .arg("--no-pause")
        .arg("--no-progress")
        .env("TMPDIR", install.workspaces())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help() {
    Command::cargo_bin("updater")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--install-root"))
        .stdout(predicate::str::contains("--no-relaunch"));
}

#[test]
fn test_missing_config_exits_with_failure() {
    let install = TestInstall::empty().unwrap();

    updater(&install)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Local config file not found"))
        .stdout(predicate::str::contains("suggestion"));
}

#[test]
fn test_missing_remote_config_section() {
    let install = TestInstall::empty().unwrap();
    install.write_config("[Version]\ncurrent_version = 1.0.0\n").unwrap();

    updater(&install)
        .assert()
        .failure()
        .stdout(predicate::str::contains("missing section [Remote Config]"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_up_to_date() {
    let server = UpdateServer::start().await;
    server.publish("1.0.0", "/game.zip", zip_package(&[("a.txt", "a")]).unwrap()).await;
    let install = TestInstall::new("1.0.0", &server.manifest_url()).unwrap();

    updater(&install)
        .assert()
        .success()
        .stdout(predicate::str::contains("Already up to date"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_without_relaunch() {
    let server = UpdateServer::start().await;
    server
        .publish("1.1.0", "/game.zip", zip_package(&[("a.txt", "new"), ("c.txt", "c")]).unwrap())
        .await;
    let install = TestInstall::new("1.0.0", &server.manifest_url()).unwrap();
    install.write_file("a.txt", "old").unwrap();
    install.write_file("b/file", "b").unwrap();

    updater(&install)
        .arg("--no-relaunch")
        .assert()
        .success()
        .stdout(predicate::str::contains("Update available: 1.0.0 -> 1.1.0"))
        .stdout(predicate::str::contains("Updated to version 1.1.0"));

    assert_eq!(install.root_entries().unwrap(), vec!["Updater", "a.txt", "c.txt"]);
    assert_eq!(install.read_file("a.txt").unwrap(), "new");
    assert!(install.read_config().unwrap().contains("current_version = 1.1.0"));
    assert_eq!(install.leftover_workspaces().unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_relaunch_failure_still_succeeds() {
    let server = UpdateServer::start().await;
    server.publish("1.1.0", "/game.zip", zip_package(&[("readme.txt", "r")]).unwrap()).await;
    let install = TestInstall::new("1.0.0", &server.manifest_url()).unwrap();

    updater(&install)
        .arg("--executable")
        .arg("NotThere")
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated to version 1.1.0"))
        .stdout(predicate::str::contains("Failed to relaunch"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_manifest_not_found() {
    let server = UpdateServer::start().await;
    server.fail_with(404).await;
    let install = TestInstall::new("1.0.0", &server.manifest_url()).unwrap();
    let config_before = install.read_config().unwrap();

    updater(&install)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("HTTP 404"));

    assert_eq!(install.read_config().unwrap(), config_before);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_check_reports_without_installing() {
    let server = UpdateServer::start().await;
    server.publish("2.0.0", "/game.zip", zip_package(&[("a.txt", "a")]).unwrap()).await;
    let install = TestInstall::new("1.0.0", &server.manifest_url()).unwrap();

    updater(&install)
        .arg("--check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Update available: 1.0.0 -> 2.0.0"))
        .stdout(predicate::str::contains("without --check"));

    assert!(!install.exists("a.txt"));
    assert!(install.read_config().unwrap().contains("current_version = 1.0.0"));
}

#[test]
fn test_unreachable_server() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let install =
        TestInstall::new("1.0.0", &format!("http://127.0.0.1:{port}/manifest.ini")).unwrap();

    updater(&install)
        .arg("--timeout")
        .arg("5")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Cannot reach"));
}
