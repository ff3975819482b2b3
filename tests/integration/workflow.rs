//! Full update runs through the public API.

use crate::common::UpdateServer;
use app_updater::config::{LocalConfig, persist_version};
use app_updater::test_utils::fixtures::{tar_gz_package, zip_package};
use app_updater::test_utils::{TestInstall, init_test_logging};
use app_updater::upgrade::{SelfUpdater, UpdateOutcome};

#[tokio::test]
async fn test_update_round_trip() {
    init_test_logging(None);
    let server = UpdateServer::start().await;
    server
        .publish(
            "1.1.0",
            "/releases/game-1.1.0.zip",
            zip_package(&[("a.txt", "new a"), ("c.txt", "c"), ("data/", ""), ("data/x.bin", "x")])
                .unwrap(),
        )
        .await;

    let install = TestInstall::new("1.0.0", &server.manifest_url()).unwrap();
    install.write_file("a.txt", "old a").unwrap();
    install.write_file("b/old.txt", "b").unwrap();

    let updater = SelfUpdater::new(install.paths()).with_config(install.upgrade_config());
    let outcome = updater.run(|_| {}).await.unwrap();
    assert!(matches!(outcome, UpdateOutcome::Updated { .. }));

    let config = LocalConfig::load(&install.config_path()).unwrap();
    assert_eq!(config.current_version, "1.1.0");
    assert_eq!(config.manifest_url, server.manifest_url());
    assert_eq!(install.root_entries().unwrap(), vec!["Updater", "a.txt", "c.txt", "data"]);
    assert_eq!(install.read_file("data/x.bin").unwrap(), "x");

    // Second run finds nothing to do
    let outcome = updater.run(|_| {}).await.unwrap();
    assert!(matches!(outcome, UpdateOutcome::UpToDate { .. }));
    assert_eq!(install.leftover_workspaces().unwrap(), 0);
}

#[tokio::test]
async fn test_prerelease_to_release() {
    let server = UpdateServer::start().await;
    server
        .publish("2.0.0", "/game.tar.gz", tar_gz_package(&[("Game", "v2")]).unwrap())
        .await;

    let install = TestInstall::new("2.0.0-rc.1", &server.manifest_url()).unwrap();
    let updater = SelfUpdater::new(install.paths()).with_config(install.upgrade_config());

    updater.run(|_| {}).await.unwrap();

    assert_eq!(install.read_file("Game").unwrap(), "v2");
    assert_eq!(LocalConfig::load(&install.config_path()).unwrap().current_version, "2.0.0");
}

#[test]
fn test_persist_version_keeps_interpolation_syntax() {
    let install = TestInstall::empty().unwrap();
    let original = "[Version]\ncurrent_version = 1.0.0\n\n[Remote Config]\nurl = http://host/%(name)s/${VAR}/m.ini\n";
    install.write_config(original).unwrap();

    persist_version(&install.config_path(), "1.2.0").unwrap();

    let config = LocalConfig::load(&install.config_path()).unwrap();
    assert_eq!(config.current_version, "1.2.0");
    assert_eq!(config.manifest_url, "http://host/%(name)s/${VAR}/m.ini");
}
