//! Error types for the release packager.
//!
//! Each variant names the step of the packaging run that failed so the
//! operator can tell a missing asset apart from a filesystem fault or an
//! archive that never reached the disk.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while assembling a release archive.
#[derive(Debug, Error)]
pub enum PackagerError {
    /// A Manifest List entry was not found in the working directory.
    ///
    /// Only fatal in strict mode; otherwise the asset is reported as
    /// skipped and packaging continues.
    #[error("missing asset {name} in {dir}")]
    MissingAsset {
        /// The Manifest List entry that was not found.
        name: &'static str,
        /// Directory that was searched.
        dir: Utf8PathBuf,
    },

    /// The archive file does not exist after the creation step.
    #[error("failed to create zip file: {path} was not produced")]
    ArchiveNotProduced {
        /// Path where the archive was expected.
        path: Utf8PathBuf,
    },

    /// Copying an asset into the staging directory failed.
    #[error("staging failed: {reason}")]
    StagingFailed {
        /// Description of the staging failure.
        reason: String,
    },

    /// The working directory does not exist or is not a directory.
    #[error("working directory not found: {path}")]
    WorkingDirNotFound {
        /// The path that was expected to be a directory.
        path: Utf8PathBuf,
    },

    /// A path could not be represented as UTF-8.
    #[error("path is not valid UTF-8: {reason}")]
    NonUtf8Path {
        /// Description of the offending path.
        reason: String,
    },

    /// The zip writer reported a failure.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Release metadata could not be serialized.
    #[error("metadata serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for packager operations.
pub type Result<T> = std::result::Result<T, PackagerError>;
