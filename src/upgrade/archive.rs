//! Extraction of downloaded packages.
//!
//! Supported formats are zip, tar and gzip-compressed tar. The format is detected
//! from the file signature, falling back to the file extension when the
//! signature is inconclusive. Entries whose paths would land outside the target
//! directory (absolute paths, `..` components) fail the extraction.

use crate::core::UpdaterError;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Component, Path};
use tracing::debug;

/// Archive formats the installer can unpack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// PKZIP archive
    Zip,
    /// Uncompressed tar
    Tar,
    /// gzip-compressed tar (`.tar.gz`, `.tgz`)
    TarGz,
}

impl ArchiveFormat {
    /// Detect the format of the file at `path`.
    pub fn detect(path: &Path) -> io::Result<Option<Self>> {
        let mut header = [0u8; 512];
        let mut file = File::open(path)?;
        let mut filled = 0;
        while filled < header.len() {
            let read = file.read(&mut header[filled..])?;
            if read == 0 {
                break;
            }
            filled += read;
        }

        Ok(Self::from_signature(&header[..filled]).or_else(|| Self::from_extension(path)))
    }

    fn from_signature(header: &[u8]) -> Option<Self> {
        if header.starts_with(b"PK\x03\x04") || header.starts_with(b"PK\x05\x06") {
            Some(Self::Zip)
        } else if header.starts_with(&[0x1f, 0x8b]) {
            Some(Self::TarGz)
        } else if header.get(257..262) == Some(&b"ustar"[..]) {
            Some(Self::Tar)
        } else {
            None
        }
    }

    fn from_extension(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().to_ascii_lowercase();
        if name.ends_with(".zip") {
            Some(Self::Zip)
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(Self::TarGz)
        } else if name.ends_with(".tar") {
            Some(Self::Tar)
        } else {
            None
        }
    }
}

/// Extract `archive` into `dest`, creating `dest` if needed.
///
/// # Errors
///
/// [`UpdaterError::ExtractFailed`] if the format is unknown, the archive is
/// corrupt, or an entry would escape `dest`.
pub fn extract(archive: &Path, dest: &Path) -> Result<(), UpdaterError> {
    let failed = |reason: String| UpdaterError::ExtractFailed {
        path: archive.to_path_buf(),
        reason,
    };

    let format = ArchiveFormat::detect(archive)
        .map_err(|error| failed(error.to_string()))?
        .ok_or_else(|| failed("unrecognised archive format (expected zip, tar or tar.gz)".to_string()))?;
    debug!("Extracting {} ({format:?}) to {}", archive.display(), dest.display());

    std::fs::create_dir_all(dest).map_err(|error| failed(error.to_string()))?;

    let file = File::open(archive).map_err(|error| failed(error.to_string()))?;
    match format {
        ArchiveFormat::Zip => extract_zip(file, dest),
        ArchiveFormat::Tar => extract_tar(file, dest),
        ArchiveFormat::TarGz => extract_tar(GzDecoder::new(file), dest),
    }
    .map_err(failed)
}

fn extract_zip(file: File, dest: &Path) -> Result<(), String> {
    let mut zip = zip::ZipArchive::new(file).map_err(|error| error.to_string())?;

    for index in 0..zip.len() {
        let entry = zip.by_index_raw(index).map_err(|error| error.to_string())?;
        if entry.enclosed_name().is_none() {
            return Err(format!("entry '{}' escapes the extraction directory", entry.name()));
        }
    }

    zip.extract(dest).map_err(|error| error.to_string())
}

fn extract_tar(reader: impl Read, dest: &Path) -> Result<(), String> {
    let mut archive = tar::Archive::new(reader);
    let entries = archive.entries().map_err(|error| error.to_string())?;

    for entry in entries {
        let mut entry = entry.map_err(|error| error.to_string())?;
        let path = entry.path().map_err(|error| error.to_string())?.into_owned();
        if !is_enclosed(&path) {
            return Err(format!("entry '{}' escapes the extraction directory", path.display()));
        }
        entry.unpack_in(dest).map_err(|error| format!("{}: {error}", path.display()))?;
    }
    Ok(())
}

fn is_enclosed(path: &Path) -> bool {
    path.components().all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}
