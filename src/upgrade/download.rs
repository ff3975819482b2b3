//! Streaming download of the update package into a temporary workspace.
//!
//! The package is written chunk by chunk as it arrives, so memory use does not
//! depend on the package size. Progress is reported through a callback; this
//! module never draws anything itself.

use crate::constants::{EXTRACT_DIR_NAME, FALLBACK_PACKAGE_NAME, WORKSPACE_PREFIX};
use crate::core::UpdaterError;
use crate::upgrade::http;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Download progress information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProgress {
    /// Bytes downloaded so far
    pub bytes_downloaded: u64,
    /// Total bytes to download, when the server sent a Content-Length
    pub total_bytes: Option<u64>,
}

impl DownloadProgress {
    /// Percentage in `0.0..=100.0`, or `None` when the size is unknown.
    pub fn percentage(&self) -> Option<f64> {
        match self.total_bytes {
            Some(0) => Some(100.0),
            Some(total) => Some((self.bytes_downloaded as f64 / total as f64 * 100.0).min(100.0)),
            None => None,
        }
    }
}

/// Per-attempt temporary directory.
///
/// Holds the downloaded archive and its extraction. The directory is deleted
/// when the workspace is closed or dropped.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a fresh workspace, inside `parent` or the system temp directory.
    pub fn create(parent: Option<&Path>) -> Result<Self, UpdaterError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(WORKSPACE_PREFIX);
        let dir = match parent {
            Some(parent) => builder.tempdir_in(parent)?,
            None => builder.tempdir()?,
        };
        debug!("Created workspace {}", dir.path().display());
        Ok(Self { dir })
    }

    /// Root of the workspace.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Directory the package is extracted into.
    pub fn extract_dir(&self) -> PathBuf {
        self.dir.path().join(EXTRACT_DIR_NAME)
    }

    /// Delete the workspace, logging instead of failing.
    pub fn close(self) {
        let path = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => debug!("Removed workspace {}", path.display()),
            Err(error) => warn!("Failed to remove workspace {}: {error}", path.display()),
        }
    }
}

/// Streams packages over HTTP.
pub struct Downloader {
    client: Client,
}

impl Downloader {
    /// Create a downloader that uses `client` for every request.
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Download `url` into `workspace`, calling `on_progress` after every chunk.
    ///
    /// Returns the path of the downloaded file. A partially written file is
    /// removed before an error is returned.
    ///
    /// # Errors
    ///
    /// - [`UpdaterError::RemoteFetchFailed`] on a status other than 200
    /// - [`UpdaterError::RemoteUnreachable`] on network failure, including a
    ///   transfer that ends before the announced Content-Length
    pub async fn download(
        &self,
        url: &str,
        workspace: &Workspace,
        mut on_progress: impl FnMut(DownloadProgress),
    ) -> Result<PathBuf, UpdaterError> {
        let mut response = http::get_ok(&self.client, url).await?;
        let total_bytes = response.content_length();
        let dest = workspace.path().join(package_file_name(url));
        debug!("Downloading {url} to {} ({total_bytes:?} bytes)", dest.display());

        let mut file = tokio::fs::File::create(&dest).await?;
        let mut bytes_downloaded: u64 = 0;
        on_progress(DownloadProgress {
            bytes_downloaded,
            total_bytes,
        });

        let result: Result<(), UpdaterError> = async {
            while let Some(chunk) =
                response.chunk().await.map_err(|error| http::unreachable(url, &error))?
            {
                file.write_all(&chunk).await?;
                bytes_downloaded += chunk.len() as u64;
                on_progress(DownloadProgress {
                    bytes_downloaded,
                    total_bytes,
                });
            }
            file.flush().await?;
            file.sync_all().await?;

            match total_bytes {
                Some(expected) if bytes_downloaded < expected => {
                    Err(UpdaterError::RemoteUnreachable {
                        url: url.to_string(),
                        reason: format!(
                            "incomplete download: received {bytes_downloaded} of {expected} bytes"
                        ),
                    })
                }
                _ => Ok(()),
            }
        }
        .await;

        drop(file);
        if let Err(error) = result {
            if let Err(remove_error) = tokio::fs::remove_file(&dest).await {
                warn!("Failed to remove partial download {}: {remove_error}", dest.display());
            }
            return Err(error);
        }

        debug!("Downloaded {bytes_downloaded} bytes to {}", dest.display());
        Ok(dest)
    }
}

/// File name for the downloaded package.
///
/// Uses the last path segment of the URL when it looks like a file name, so the
/// extension can help detect the archive format; otherwise `new_version.zip`.
pub fn package_file_name(url: &str) -> String {
    let without_fragment = url.split('#').next().unwrap_or(url);
    let without_query = without_fragment.split('?').next().unwrap_or(without_fragment);
    let path = without_query.split_once("://").map_or(without_query, |(_, rest)| {
        rest.find('/').map_or("", |index| &rest[index..])
    });

    let candidate: String = path
        .rsplit('/')
        .next()
        .unwrap_or("")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();

    if candidate.contains('.') && !candidate.starts_with('.') {
        candidate
    } else {
        FALLBACK_PACKAGE_NAME.to_string()
    }
}
