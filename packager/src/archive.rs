//! Zip archive creation and inspection.
//!
//! The archive is flat: every staged file becomes one deflate-compressed
//! entry named by its base file name. Entries carry a fixed modification
//! time, so identical inputs produce byte-identical archives.

use crate::error::Result;
use camino::{Utf8Path, Utf8PathBuf};
use log::trace;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

/// Writes a set of files into an archive, enabling test mocking.
///
/// # Examples
///
/// ```
/// use link_collector_packager::archive::ZipArchiveWriter;
///
/// let writer = ZipArchiveWriter;
/// // Use writer.write_archive(archive_path, entries) in production
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait ArchiveWriter {
    /// Write `entries` into a new archive at `archive_path`.
    ///
    /// Each entry is a `(source_path, entry_name)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::PackagerError::Io`] if a source cannot be
    /// read or the archive cannot be written, or
    /// [`crate::error::PackagerError::Archive`] if the zip writer fails.
    fn write_archive(&self, archive_path: &Utf8Path, entries: &[(Utf8PathBuf, String)])
    -> Result<()>;
}

/// Production [`ArchiveWriter`] producing deflate-compressed zip files.
///
/// The archive is assembled in a temporary file beside `archive_path` and
/// renamed into place once complete, so a failed write leaves nothing at
/// `archive_path`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiveWriter;

impl ArchiveWriter for ZipArchiveWriter {
    fn write_archive(
        &self,
        archive_path: &Utf8Path,
        entries: &[(Utf8PathBuf, String)],
    ) -> Result<()> {
        let parent = archive_path
            .parent()
            .filter(|p| !p.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let mut temp = NamedTempFile::new_in(parent)?;

        let mut zip = ZipWriter::new(temp.as_file_mut());
        for (source, name) in entries {
            trace!("adding {source} as {name}");
            let mut reader = fs::File::open(source)?;
            zip.start_file(name.as_str(), entry_options())?;
            io::copy(&mut reader, &mut zip)?;
        }
        zip.finish()?;

        temp.as_file().sync_all()?;
        temp.persist(archive_path).map_err(|e| e.error)?;
        Ok(())
    }
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644)
}

/// Compute the lowercase hex SHA-256 digest of a file.
///
/// # Errors
///
/// Returns [`crate::error::PackagerError::Io`] if the file cannot be read.
pub fn compute_sha256(path: &Utf8Path) -> Result<String> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// List entry names of the zip archive at `path`, in archive order.
///
/// # Errors
///
/// Returns [`crate::error::PackagerError::Io`] if the file cannot be opened,
/// or [`crate::error::PackagerError::Archive`] if it is not a valid zip.
pub fn list_entries(path: &Utf8Path) -> Result<Vec<String>> {
    let file = fs::File::open(path)?;
    let mut archive = ZipArchive::new(file)?;
    let mut names = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        names.push(archive.by_index(index)?.name().to_owned());
    }
    Ok(names)
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
