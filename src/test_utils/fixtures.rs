//! In-memory package and document fixtures.

use anyhow::Result;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

/// Local config file content for `version` and `manifest_url`.
pub fn config_ini(version: &str, manifest_url: &str) -> String {
    format!("[Version]\ncurrent_version = {version}\n\n[Remote Config]\nurl = {manifest_url}\n")
}

/// Manifest content announcing `version` at `download_url`.
pub fn manifest_ini(version: &str, download_url: &str) -> String {
    format!("[Version]\ncurrent_version = {version}\n\n[Download]\nurl = {download_url}\n")
}

/// Zip archive containing `entries` as `(path, content)` pairs.
///
/// Paths ending in `/` become directories.
pub fn zip_package(entries: &[(&str, &str)]) -> Result<Vec<u8>> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (path, content) in entries {
        if let Some(dir) = path.strip_suffix('/') {
            zip.add_directory(dir, options)?;
        } else {
            zip.start_file(*path, options)?;
            zip.write_all(content.as_bytes())?;
        }
    }

    Ok(zip.finish()?.into_inner())
}

/// gzip-compressed tar archive containing `entries` as `(path, content)` pairs.
pub fn tar_gz_package(entries: &[(&str, &str)]) -> Result<Vec<u8>> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));

    for (path, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        builder.append_data(&mut header, path, content.as_bytes())?;
    }

    Ok(builder.into_inner()?.finish()?)
}
