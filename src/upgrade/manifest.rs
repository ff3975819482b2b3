//! The remote manifest announcing the latest version.
//!
//! The manifest uses the same INI format as the local configuration:
//!
//! ```ini
//! [Version]
//! current_version = 1.5.0
//!
//! [Download]
//! url = https://downloads.example.com/game/game-1.5.0.zip
//! ```
//!
//! Its contents are trusted as-is; no signature or checksum is verified.

use crate::config::{parse_document, require};
use crate::constants::{DOWNLOAD_SECTION, URL_KEY, VERSION_KEY, VERSION_SECTION};
use crate::core::UpdaterError;
use crate::upgrade::http;
use reqwest::Client;
use tracing::debug;

/// Latest version and package location published by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteManifest {
    /// Advertised version, as written in the manifest
    pub version: String,
    /// URL of the package to install
    pub download_url: String,
}

impl RemoteManifest {
    /// Download and parse the manifest at `url`.
    ///
    /// # Errors
    ///
    /// - [`UpdaterError::RemoteUnreachable`] on network failure
    /// - [`UpdaterError::RemoteFetchFailed`] on a status other than 200
    /// - [`UpdaterError::ConfigMalformed`] if the body is not valid INI or lacks
    ///   `[Version] current_version` / `[Download] url`
    pub async fn fetch(client: &Client, url: &str) -> Result<Self, UpdaterError> {
        let response = http::get_ok(client, url).await?;
        let body = response.text().await.map_err(|error| http::unreachable(url, &error))?;
        let manifest = Self::parse(url, &body)?;
        debug!("Manifest {url}: version {}, package {}", manifest.version, manifest.download_url);
        Ok(manifest)
    }

    /// Parse a manifest body fetched from `url`.
    pub fn parse(url: &str, body: &str) -> Result<Self, UpdaterError> {
        let origin = format!("manifest {url}");
        let doc = parse_document(&origin, body)?;

        Ok(Self {
            version: require(&doc, &origin, VERSION_SECTION, VERSION_KEY)?,
            download_url: require(&doc, &origin, DOWNLOAD_SECTION, URL_KEY)?,
        })
    }
}
