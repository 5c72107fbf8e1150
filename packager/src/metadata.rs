//! Release metadata sidecar.
//!
//! Describes a finished archive in `build-meta.json`: when it was generated,
//! the extension version read from `manifest.json`, the archive name, its
//! digest and size, and the files it contains.

use crate::error::Result;
use camino::Utf8Path;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::time::{SystemTime, UNIX_EPOCH};

/// Metadata written next to the release archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseMetadata {
    /// ISO 8601 UTC timestamp (`YYYY-MM-DDThh:mm:ssZ`).
    pub generated_at: String,
    /// Extension version from `manifest.json`, if readable.
    pub version: Option<String>,
    /// File name of the archive.
    pub artifact: String,
    /// Lowercase hex SHA-256 digest of the archive.
    pub sha256: String,
    /// Archive size in bytes.
    pub size_bytes: u64,
    /// Entry names contained in the archive.
    pub files: Vec<String>,
}

impl ReleaseMetadata {
    /// Serialize to pretty-printed JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::PackagerError::Serialization`] if
    /// serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Write the metadata to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write_to(&self, path: &Utf8Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[derive(Deserialize)]
struct ExtensionManifest {
    version: Option<String>,
}

/// Read the `version` field of the extension manifest at `path`.
///
/// Returns `None` when the manifest is absent, unreadable, is not valid
/// JSON, or has no string `version`. The version is informational, so every
/// failure other than absence is logged at `warn` rather than treated as
/// fatal.
#[must_use]
pub fn read_manifest_version(path: &Utf8Path) -> Option<String> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            warn!("could not read {path}: {e}");
            return None;
        }
    };

    match serde_json::from_slice::<ExtensionManifest>(&bytes) {
        Ok(manifest) => manifest.version,
        Err(e) => {
            warn!("could not read version from {path}: {e}");
            None
        }
    }
}

/// Return the current UTC time as `YYYY-MM-DDThh:mm:ssZ`.
///
/// A clock set before the Unix epoch is reported as the epoch itself.
#[must_use]
pub fn now_utc_iso8601() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());
    format_epoch_secs(secs)
}

/// Format a Unix epoch timestamp as `YYYY-MM-DDThh:mm:ssZ`.
#[must_use]
pub fn format_epoch_secs(epoch_secs: u64) -> String {
    let (year, month, day) = civil_from_days(epoch_secs.div_euclid(86_400));
    let day_secs = epoch_secs.rem_euclid(86_400);
    let (hour, rest) = (day_secs.div_euclid(3_600), day_secs.rem_euclid(3_600));
    let (minute, second) = (rest.div_euclid(60), rest.rem_euclid(60));
    format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}Z")
}

/// Convert days since 1970-01-01 to a `(year, month, day)` triple.
///
/// Howard Hinnant's `civil_from_days`, restricted to non-negative day
/// counts so it stays in unsigned arithmetic.
#[expect(
    clippy::integer_division,
    reason = "the civil calendar conversion relies on truncating division"
)]
fn civil_from_days(days: u64) -> (u64, u64, u64) {
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + u64::from(month <= 2);
    (year, month, day)
}
