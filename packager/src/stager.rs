//! Staging directory lifecycle.
//!
//! A [`StagingDir`] is reset to an empty directory when created, receives
//! copies of the present extension assets, and is removed again when it is
//! dropped. Dropping happens on every exit path of a packaging run, so a
//! failed run never leaves the staging directory behind.

use crate::error::{PackagerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, warn};
use std::fs;

/// Outcome of staging a single Manifest List entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStatus {
    /// The asset was copied into the staging directory.
    Staged {
        /// Number of bytes copied.
        bytes: u64,
    },
    /// The asset was not present in the working directory.
    Skipped,
}

impl AssetStatus {
    /// Return `true` if the asset was copied.
    #[must_use]
    pub const fn is_staged(self) -> bool {
        matches!(self, Self::Staged { .. })
    }
}

/// An exclusively owned staging directory, removed on drop.
#[derive(Debug)]
pub struct StagingDir {
    path: Utf8PathBuf,
}

impl StagingDir {
    /// Reset `path` to a fresh, empty directory.
    ///
    /// Any existing directory at `path` (for example one left by an
    /// interrupted run) is removed first.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::Io`] if the stale directory cannot be removed
    /// or the new one cannot be created.
    pub fn create(path: Utf8PathBuf) -> Result<Self> {
        if path.exists() {
            debug!("removing stale staging directory {path}");
            fs::remove_dir_all(&path)?;
        }
        fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    /// Path of the staging directory.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Copy `source` into the staging directory under its base name.
    ///
    /// A source that is not a regular file is reported as
    /// [`AssetStatus::Skipped`].
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::StagingFailed`] if the copy fails, or
    /// [`PackagerError::NonUtf8Path`] if `source` has no file name.
    pub fn stage(&self, source: &Utf8Path) -> Result<AssetStatus> {
        if !source.is_file() {
            return Ok(AssetStatus::Skipped);
        }

        let name = source.file_name().ok_or_else(|| PackagerError::NonUtf8Path {
            reason: format!("{source} has no file name"),
        })?;
        let dest = self.path.join(name);

        let bytes = fs::copy(source, &dest).map_err(|e| PackagerError::StagingFailed {
            reason: format!("failed to copy {source} to {dest}: {e}"),
        })?;

        Ok(AssetStatus::Staged { bytes })
    }

    /// List the regular files currently in the staging directory.
    ///
    /// Entries are sorted by file name so archive contents do not depend on
    /// directory iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::Io`] if the directory cannot be read or an
    /// entry name is not valid UTF-8.
    pub fn staged_files(&self) -> Result<Vec<(Utf8PathBuf, String)>> {
        let mut files = Vec::new();
        for entry in self.path.read_dir_utf8()? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            files.push((entry.path().to_owned(), entry.file_name().to_owned()));
        }
        files.sort_by(|(_, a), (_, b)| a.cmp(b));
        Ok(files)
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        if !self.path.exists() {
            return;
        }
        match fs::remove_dir_all(&self.path) {
            Ok(()) => debug!("removed staging directory {}", self.path),
            Err(e) => warn!("failed to remove staging directory {}: {e}", self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().expect("temp dir creation succeeds")
    }

    fn utf8(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("temp dir is UTF-8")
    }

    #[rstest]
    fn create_replaces_stale_directory(temp_dir: TempDir) {
        let path = utf8(&temp_dir).join("release");
        fs::create_dir_all(&path).expect("mkdir");
        fs::write(path.join("leftover.js"), b"stale").expect("write leftover");

        let staging = StagingDir::create(path.clone()).expect("staging resets");

        assert!(path.is_dir());
        assert!(staging.staged_files().expect("list").is_empty());
    }

    #[rstest]
    fn stage_copies_file_under_base_name(temp_dir: TempDir) {
        let root = utf8(&temp_dir);
        let source = root.join("content.js");
        fs::write(&source, b"console.log('hi');").expect("write source");

        let staging = StagingDir::create(root.join("release")).expect("staging");
        let status = staging.stage(&source).expect("stage");

        assert_eq!(status, AssetStatus::Staged { bytes: 18 });
        let files = staging.staged_files().expect("list");
        assert_eq!(files.len(), 1);
        assert_eq!(files.first().map(|(_, n)| n.as_str()), Some("content.js"));
    }

    #[rstest]
    fn stage_skips_missing_source(temp_dir: TempDir) {
        let root = utf8(&temp_dir);
        let staging = StagingDir::create(root.join("release")).expect("staging");

        let status = staging.stage(&root.join("popup.html")).expect("stage");

        assert_eq!(status, AssetStatus::Skipped);
        assert!(!status.is_staged());
    }

    #[rstest]
    fn stage_skips_directories(temp_dir: TempDir) {
        let root = utf8(&temp_dir);
        fs::create_dir_all(root.join("popup.js")).expect("mkdir");
        let staging = StagingDir::create(root.join("release")).expect("staging");

        let status = staging.stage(&root.join("popup.js")).expect("stage");

        assert_eq!(status, AssetStatus::Skipped);
    }

    #[rstest]
    fn staged_files_are_sorted_and_ignore_subdirectories(temp_dir: TempDir) {
        let root = utf8(&temp_dir);
        let staging = StagingDir::create(root.join("release")).expect("staging");
        for name in ["popup.js", "background.js", "manifest.json"] {
            fs::write(staging.path().join(name), name).expect("write");
        }
        fs::create_dir_all(staging.path().join("nested")).expect("mkdir");

        let names: Vec<String> = staging
            .staged_files()
            .expect("list")
            .into_iter()
            .map(|(_, n)| n)
            .collect();

        assert_eq!(names, ["background.js", "manifest.json", "popup.js"]);
    }

    #[rstest]
    fn drop_removes_directory(temp_dir: TempDir) {
        let path = utf8(&temp_dir).join("release");
        let staging = StagingDir::create(path.clone()).expect("staging");
        fs::write(staging.path().join("manifest.json"), b"{}").expect("write");

        drop(staging);

        assert!(!path.exists());
    }
}
