//! Helpers shared by the integration tests.

use app_updater::test_utils::fixtures::manifest_ini;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Local update server publishing one manifest and one package.
pub struct UpdateServer {
    pub server: MockServer,
}

impl UpdateServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn manifest_url(&self) -> String {
        format!("{}/manifest.ini", self.server.uri())
    }

    /// Publish `version` with the package served at `package_path`.
    pub async fn publish(&self, version: &str, package_path: &str, package: Vec<u8>) {
        let body = manifest_ini(version, &format!("{}{package_path}", self.server.uri()));
        Mock::given(method("GET"))
            .and(path("/manifest.ini"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&self.server)
            .await;
        Mock::given(method("GET"))
            .and(path(package_path))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(package))
            .mount(&self.server)
            .await;
    }

    /// Answer every request with `status`.
    pub async fn fail_with(&self, status: u16) {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }
}
