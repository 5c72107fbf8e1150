//! Release asset list and output path layout.
//!
//! This module fixes which extension assets are eligible for packaging and
//! where the staging directory, archive, and metadata sidecar live relative
//! to the working directory.

use crate::error::{PackagerError, Result};
use camino::{Utf8Path, Utf8PathBuf};

/// Extension assets eligible for packaging, in packaging order.
///
/// Names are relative to the working directory. Every entry is a plain
/// file name, so the archive built from them is flat.
pub const EXTENSION_ASSETS: &[&str] = &[
    "manifest.json",
    "content.js",
    "background.js",
    "popup.html",
    "popup.js",
    "icon-16x16.png",
    "icon-32x32.png",
    "icon-48x48.png",
    "icon-128x128.png",
];

/// Name of the transient staging directory.
pub const STAGING_DIR_NAME: &str = "release";

/// File name of the release archive.
pub const ARCHIVE_NAME: &str = "link-collector.zip";

/// File name of the optional release metadata sidecar.
pub const METADATA_NAME: &str = "build-meta.json";

/// Paths used by a packaging run, all derived from the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLayout {
    working_dir: Utf8PathBuf,
}

impl PackageLayout {
    /// Create a layout rooted at `working_dir`.
    ///
    /// # Example
    ///
    /// ```
    /// use camino::Utf8PathBuf;
    /// use link_collector_packager::layout::PackageLayout;
    ///
    /// let layout = PackageLayout::new(Utf8PathBuf::from("/work"));
    /// assert_eq!(layout.archive_path(), "/work/link-collector.zip");
    /// assert_eq!(layout.staging_dir(), "/work/release");
    /// ```
    #[must_use]
    pub const fn new(working_dir: Utf8PathBuf) -> Self {
        Self { working_dir }
    }

    /// Resolve a layout from an optional directory, defaulting to the
    /// current directory.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::NonUtf8Path`] if the current directory is not
    /// valid UTF-8, or [`PackagerError::WorkingDirNotFound`] if the resolved
    /// path is not a directory.
    pub fn resolve(dir: Option<&Utf8Path>) -> Result<Self> {
        let working_dir = match dir {
            Some(path) => path.to_owned(),
            None => current_dir_utf8()?,
        };

        if !working_dir.is_dir() {
            return Err(PackagerError::WorkingDirNotFound { path: working_dir });
        }

        Ok(Self::new(working_dir))
    }

    /// Directory holding the extension assets.
    #[must_use]
    pub fn working_dir(&self) -> &Utf8Path {
        &self.working_dir
    }

    /// Path of the transient staging directory.
    #[must_use]
    pub fn staging_dir(&self) -> Utf8PathBuf {
        self.working_dir.join(STAGING_DIR_NAME)
    }

    /// Path of the release archive.
    #[must_use]
    pub fn archive_path(&self) -> Utf8PathBuf {
        self.working_dir.join(ARCHIVE_NAME)
    }

    /// Path of the release metadata sidecar.
    #[must_use]
    pub fn metadata_path(&self) -> Utf8PathBuf {
        self.working_dir.join(METADATA_NAME)
    }

    /// Source path of a Manifest List entry.
    #[must_use]
    pub fn asset_path(&self, name: &str) -> Utf8PathBuf {
        self.working_dir.join(name)
    }
}

fn current_dir_utf8() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir()?;
    Utf8PathBuf::try_from(cwd).map_err(|e| PackagerError::NonUtf8Path {
        reason: format!("current directory is not valid UTF-8: {e}"),
    })
}
