//! Release package assembly.
//!
//! Orchestrates a packaging run: reset the staging directory, stage the
//! present extension assets, replace the archive, verify it reached disk,
//! and describe the result. The staging directory is released on every exit
//! path, including failures. Per-asset status lines are written to a
//! progress sink as each asset is staged, so they survive a failed run.

use crate::archive::{ArchiveWriter, ZipArchiveWriter, compute_sha256};
use crate::error::{PackagerError, Result};
use crate::layout::{EXTENSION_ASSETS, PackageLayout};
use crate::metadata::{ReleaseMetadata, now_utc_iso8601, read_manifest_version};
use crate::output::asset_line;
use crate::stager::{AssetStatus, StagingDir};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::fs;
use std::io::Write;

/// Input parameters for [`assemble`].
#[derive(Debug, Clone)]
pub struct PackageParams {
    /// Paths used by the run.
    pub layout: PackageLayout,
    /// Fail on the first missing asset instead of skipping it.
    pub strict: bool,
    /// Write the release metadata sidecar next to the archive.
    pub write_metadata: bool,
}

impl PackageParams {
    /// Parameters for a default run: skip missing assets, no metadata.
    #[must_use]
    pub const fn new(layout: PackageLayout) -> Self {
        Self {
            layout,
            strict: false,
            write_metadata: false,
        }
    }
}

/// Output produced by [`assemble`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutput {
    /// Path to the created archive.
    pub archive_path: Utf8PathBuf,
    /// Archive size in bytes.
    pub size_bytes: u64,
    /// Lowercase hex SHA-256 digest of the archive.
    pub sha256: String,
    /// Status of every Manifest List entry, in list order.
    pub assets: Vec<(&'static str, AssetStatus)>,
    /// Extension version from `manifest.json`, if readable.
    pub version: Option<String>,
    /// Path of the metadata sidecar, if one was written.
    pub metadata_path: Option<Utf8PathBuf>,
}

impl PackageOutput {
    /// Number of assets included in the archive.
    #[must_use]
    pub fn staged_count(&self) -> usize {
        self.assets.iter().filter(|(_, s)| s.is_staged()).count()
    }

    /// Names of the assets that were not found.
    #[must_use]
    pub fn skipped(&self) -> Vec<&'static str> {
        self.assets
            .iter()
            .filter(|(_, s)| !s.is_staged())
            .map(|(name, _)| *name)
            .collect()
    }
}

/// Package the extension assets into a zip archive.
///
/// Writes `Copying files...` and one status line per Manifest List entry to
/// `progress` while staging. Pass [`std::io::sink`] to run silently.
///
/// # Errors
///
/// Returns [`PackagerError::MissingAsset`] in strict mode when an asset is
/// absent, [`PackagerError::ArchiveNotProduced`] if the archive is not on
/// disk after writing, or an I/O, archive, or serialization error from the
/// underlying steps.
pub fn assemble(params: &PackageParams, progress: &mut dyn Write) -> Result<PackageOutput> {
    assemble_with(params, &ZipArchiveWriter, progress)
}

/// Package the extension assets using the given archive writer.
///
/// # Errors
///
/// See [`assemble`].
pub fn assemble_with(
    params: &PackageParams,
    writer: &dyn ArchiveWriter,
    progress: &mut dyn Write,
) -> Result<PackageOutput> {
    let layout = &params.layout;
    let staging = StagingDir::create(layout.staging_dir())?;
    let assets = stage_assets(layout, &staging, params.strict, progress)?;

    // The sidecar is removed with the archive it describes.
    let archive_path = layout.archive_path();
    let metadata_path = layout.metadata_path();
    remove_file_if_exists(&archive_path)?;
    remove_file_if_exists(&metadata_path)?;

    let entries = staging.staged_files()?;
    writer.write_archive(&archive_path, &entries)?;
    if !archive_path.is_file() {
        return Err(PackagerError::ArchiveNotProduced { path: archive_path });
    }
    drop(staging);

    let size_bytes = fs::metadata(&archive_path)?.len();
    let sha256 = compute_sha256(&archive_path)?;
    let version = read_manifest_version(&layout.asset_path("manifest.json"));

    let metadata_path = if params.write_metadata {
        let metadata = ReleaseMetadata {
            generated_at: now_utc_iso8601(),
            version: version.clone(),
            artifact: archive_file_name(&archive_path),
            sha256: sha256.clone(),
            size_bytes,
            files: entries.into_iter().map(|(_, name)| name).collect(),
        };
        metadata.write_to(&metadata_path)?;
        Some(metadata_path)
    } else {
        None
    };

    Ok(PackageOutput {
        archive_path,
        size_bytes,
        sha256,
        assets,
        version,
        metadata_path,
    })
}

/// Remove the staging directory, archive, and metadata sidecar.
///
/// Returns the paths that were removed; an already clean working directory
/// yields an empty list.
///
/// # Errors
///
/// Returns [`PackagerError::Io`] if an existing output cannot be removed.
pub fn clean(layout: &PackageLayout) -> Result<Vec<Utf8PathBuf>> {
    let mut removed = Vec::new();

    let staging = layout.staging_dir();
    if staging.exists() {
        fs::remove_dir_all(&staging)?;
        removed.push(staging);
    }

    for path in [layout.archive_path(), layout.metadata_path()] {
        if remove_file_if_exists(&path)? {
            removed.push(path);
        }
    }

    Ok(removed)
}

fn stage_assets(
    layout: &PackageLayout,
    staging: &StagingDir,
    strict: bool,
    progress: &mut dyn Write,
) -> Result<Vec<(&'static str, AssetStatus)>> {
    report_progress(progress, "Copying files...");
    EXTENSION_ASSETS
        .iter()
        .map(|&name| {
            let status = staging.stage(&layout.asset_path(name))?;
            debug!("{name}: {status:?}");
            report_progress(progress, &asset_line(name, status));
            if strict && !status.is_staged() {
                return Err(PackagerError::MissingAsset {
                    name,
                    dir: layout.working_dir().to_owned(),
                });
            }
            Ok((name, status))
        })
        .collect()
}

fn report_progress(progress: &mut dyn Write, line: &str) {
    if let Err(e) = writeln!(progress, "{line}") {
        debug!("could not write progress line: {e}");
    }
}

/// Delete `path` if it exists, returning whether anything was removed.
fn remove_file_if_exists(path: &Utf8Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    debug!("removing previous output {path}");
    fs::remove_file(path)?;
    Ok(true)
}

fn archive_file_name(path: &Utf8Path) -> String {
    path.file_name().unwrap_or_default().to_owned()
}

#[cfg(test)]
#[path = "assembler_tests.rs"]
mod tests;
